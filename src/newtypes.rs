use serde::{Deserialize, Serialize};

use std::fmt::Display;

macro_rules! newtype {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl $name {
            pub fn new(id: i64) -> $name {
                $name(id)
            }

            pub fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> $name {
                $name(id)
            }
        }
    };
}

newtype!(DestinationId);

newtype!(DataSourceId);

newtype!(GroupId);

newtype!(UserId);

newtype!(QueryId);
