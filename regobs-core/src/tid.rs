//! RegObs type identifiers ("TIDs").
//!
//! Every categorical field in the RegObs API is sent as an integer type id.
//! `tid_enum!` declares a closed Rust enum together with its wire id and a
//! `Serialize` impl that writes the id.

macro_rules! tid_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Type id used by the RegObs API.
            pub const fn tid(self) -> i32 {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.serialize_i32(self.tid())
            }
        }
    };
}

pub(crate) use tid_enum;

#[cfg(test)]
mod tests {
    tid_enum! {
        Sample {
            First = 1,
            Negative = -1,
        }
    }

    #[test]
    fn test_tid_serializes_as_integer() {
        assert_eq!(Sample::First.tid(), 1);
        assert_eq!(serde_json::to_string(&Sample::Negative).unwrap(), "-1");
    }
}
