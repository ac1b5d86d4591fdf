//! Declarative generation of layered settings structs.

/// Define a struct of independently optional settings.
///
/// Each entry names the field, its `has_`/`set_`/`clear_` accessors, its type
/// and its JSON key. Entries with `=> default` get a getter that falls back
/// to that default; entries without one get a getter returning `Option`.
///
/// The generated struct also gets `layer_json` (apply one JSON object with
/// the rules in [`crate::json`]) and `write_json` (emit every set field).
macro_rules! layered_settings {
    (@getter $(#[$fmeta:meta])* $field:ident: $ty:ty => $default:expr) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> $ty {
            self.$field.clone().unwrap_or_else(|| $default)
        }
    };
    (@getter $(#[$fmeta:meta])* $field:ident: $ty:ty) => {
        $(#[$fmeta])*
        pub fn $field(&self) -> Option<$ty> {
            self.$field.clone()
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident, $has:ident, $set:ident, $clear:ident: $ty:ty = $key:literal $(=> $default:expr)?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( $field: Option<$ty>, )*
        }

        impl $name {
            /// JSON keys of every field, in declaration order.
            pub const KEYS: &'static [&'static str] = &[$($key),*];

            $(
                pub fn $has(&self) -> bool {
                    self.$field.is_some()
                }

                layered_settings!(@getter $(#[$fmeta])* $field: $ty $(=> $default)?);

                pub fn $set(&mut self, value: $ty) {
                    self.$field = Some(value);
                }

                pub fn $clear(&mut self) {
                    self.$field = None;
                }
            )*

            /// Apply every key present in `obj`. Problems are appended to
            /// `warnings`, attributed to `owner`.
            pub(crate) fn layer_json(
                &mut self,
                owner: &str,
                obj: &serde_json::Map<String, serde_json::Value>,
                warnings: &mut Vec<$crate::SettingsLoadWarning>,
            ) {
                $( $crate::json::layer_field(obj, $key, &mut self.$field, owner, warnings); )*
            }

            /// Write every set field into `out`.
            pub(crate) fn write_json(&self, out: &mut serde_json::Map<String, serde_json::Value>) {
                $( $crate::json::write_field(out, $key, &self.$field); )*
            }
        }
    };
}
