//! Special logging functions for specific use cases

use super::tags::LogTag;
use crate::hub::DeliveryReport;
use crate::logger;
use colored::*;

/// Log the outcome of a fan-out at debug level
///
/// Shows the action kind, the target (a wall id or "all"), how many outboxes
/// accepted the message and which clients were evicted. Evictions are
/// highlighted since they close a connection.
pub fn log_delivery(tag: LogTag, kind: &str, target: &str, report: &DeliveryReport) {
    if report.evicted.is_empty() {
        logger::debug(
            tag,
            &format!(
                "{} → {} (delivered={})",
                kind.bright_white().bold(),
                target.bright_cyan(),
                report.delivered
            ),
        );
        return;
    }

    let evicted = report
        .evicted
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    logger::debug(
        tag,
        &format!(
            "{} → {} (delivered={}, {} [{}])",
            kind.bright_white().bold(),
            target.bright_cyan(),
            report.delivered,
            "evicted".bright_red().bold(),
            evicted
        ),
    );
}
