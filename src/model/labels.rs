use anyhow::{bail, Result};

/// Declares a closed enum whose variants serialize as human-readable labels.
///
/// Generates `ALL`, `label()`, `Display` and a case-insensitive `FromStr`.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> anyhow::Result<Self> {
                $crate::model::labels::find_label(stringify!($name), Self::ALL, s, |v| v.label())
            }
        }
    };
}

pub(crate) use labelled_enum;

/// Match `input` against the labels of `all`, ignoring case and treating
/// `-`, `_` and spaces as equivalent ("on-hold" finds "On Hold").
pub(crate) fn find_label<T: Copy>(
    kind: &str,
    all: &[T],
    input: &str,
    label: impl Fn(&T) -> &'static str,
) -> Result<T> {
    let wanted = normalize(input);
    if let Some(found) = all.iter().find(|v| normalize(label(v)) == wanted) {
        return Ok(*found);
    }
    let options: Vec<&str> = all.iter().map(&label).collect();
    bail!("Unknown {} '{}'. Expected one of: {}", kind, input.trim(), options.join(", "))
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
