/// `config_struct!`: config sections declared once, defaults inline
///
/// One invocation may declare several sections. For each one the macro emits
/// the struct (fields become `pub`) and a `Default` impl built from the inline
/// values. Sections deserialize with `#[serde(default, deny_unknown_fields)]`:
/// omitted keys fall back to their defaults, misspelled keys are an error
/// instead of being silently ignored.
///
/// ```
/// wallhub::config_struct! {
///     pub struct LimitsConfig {
///         max_walls: usize = 64,
///     }
/// }
///
/// assert_eq!(LimitsConfig::default().max_walls, 64);
/// ```
#[macro_export]
macro_rules! config_struct {
    ($(
        $(#[$section_meta:meta])*
        $vis:vis struct $section:ident {
            $(
                $(#[$key_meta:meta])*
                $key:ident: $key_ty:ty = $key_default:expr
            ),* $(,)?
        }
    )+) => {$(
        $(#[$section_meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default, deny_unknown_fields)]
        $vis struct $section {
            $( $(#[$key_meta])* pub $key: $key_ty, )*
        }

        impl Default for $section {
            fn default() -> Self {
                $section { $( $key: $key_default, )* }
            }
        }
    )+};
}
