//! Protocol Buffer definitions for the Listen RPC.
//!
//! The code under `src/generated` is emitted by [`tonic-build`] from the
//! trimmed `google.firestore.v1` and `google.rpc` schemas in `proto/`. Field
//! values are carried through untouched; decoding them is left to callers.
//!
//! [`tonic-build`]: https://docs.rs/tonic-build

pub mod google {
    pub mod rpc {
        include!("../generated/google.rpc.rs");
    }

    pub mod firestore {
        pub mod v1 {
            include!("../generated/google.firestore.v1.rs");
        }
    }
}

mod listen_ext;

pub use google::firestore::v1::*;
pub use google::rpc;
