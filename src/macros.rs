#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:literal
        $(, buckets: $buckets:expr)?
        , prod: |$caps:ident, $subject:ident| -> $ret_ty:ty $body_expr:block
        $(,)?
    ) => {{
        $crate::engine::Rule {
            name: $name,
            pattern: $crate::regex!($pat),
            buckets: $crate::engine::BucketMask::empty() $(| $buckets)?,
            production: $crate::engine::production(move |$caps, $subject| {
                let result: $ret_ty = $body_expr;
                result
            }),
        }
    }};
}

/// Declares a closed vocabulary enum with its canonical upper-case names.
///
/// Generates `ALL`, `as_str`, `Display` and a case-insensitive `FromStr`.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical upper-case name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $crate::UnknownName { kind: stringify!($name), name: wanted.to_string() })
            }
        }
    };
}
