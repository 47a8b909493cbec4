/// Core logging implementation with automatic filtering
///
/// Filtering rules, in order:
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug level requires --debug-<module> for that tag
/// 4. Verbose level requires --verbose or --verbose-<module>
/// 5. If an allow-list of tags is set, the tag must be in it
use super::config::{is_debug_enabled_for_tag, is_verbose_enabled_for_tag, with_logger_config};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    with_logger_config(|config| {
        if level > config.min_level {
            return false;
        }

        if level == LogLevel::Debug && !is_debug_enabled_for_tag(config, tag) {
            return false;
        }

        if level == LogLevel::Verbose
            && !(is_verbose_enabled_for_tag(config, tag) || config.verbose_tags.is_empty())
        {
            return false;
        }

        config.enabled_tags.is_empty() || config.enabled_tags.contains(&tag.to_debug_key())
    })
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}
