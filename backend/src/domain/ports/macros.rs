//! `define_port_error!` generates `thiserror` enums for port failures plus
//! snake_case constructors that accept anything convertible into each field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
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
    define_port_error! {
        pub enum UploadPortError {
            Rejected { reason: String } => "rejected: {reason}",
            TooLarge { limit: u64 } => "image exceeds {limit} bytes",
            Status { status: u16, body: String } => "status {status}: {body}",
            Closed => "connection closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        assert_eq!(UploadPortError::rejected("blurry").to_string(), "rejected: blurry");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(
            UploadPortError::too_large(1024_u64).to_string(),
            "image exceeds 1024 bytes"
        );
    }

    #[test]
    fn mixed_fields_are_positional() {
        let err = UploadPortError::status(503_u16, "busy");
        assert_eq!(err, UploadPortError::Status { status: 503, body: "busy".to_owned() });
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(UploadPortError::closed(), UploadPortError::Closed);
    }
}
