//! Declarative helper for port error enums.
//!
//! `define_port_error!` emits a `thiserror` enum plus one snake_case
//! constructor per variant. Constructor parameters take `impl Into<T>` so
//! adapters can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_fields $variant () () $( $field : $ty, )*);
    };

    (@ctor_fields $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = "Build the `" $variant "` variant."]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_fields $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_fields
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LookupError {
            Missing { key: String } => "missing: {key}",
            Throttled { retry_secs: u64 } => "throttled for {retry_secs}s",
            Rejected { reason: String, attempts: u32 } => "rejected after {attempts}: {reason}",
            Closed => "closed",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        assert_eq!(LookupError::missing("ada").to_string(), "missing: ada");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            LookupError::throttled(30_u64),
            LookupError::Throttled { retry_secs: 30 }
        );
    }

    #[rstest]
    fn mixed_fields_follow_declaration_order() {
        let err = LookupError::rejected("locked", 3_u32);
        assert_eq!(err.to_string(), "rejected after 3: locked");
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupError::closed(), LookupError::Closed);
    }
}
