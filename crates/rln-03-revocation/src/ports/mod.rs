//! # Ports Layer

pub mod inbound;
pub mod outbound;

pub use inbound::RevocationApi;
pub use outbound::{
    BanStatus, ExternalGroupClient, ExternalGroupError, MembershipError, MembershipStore,
    NoticeError, SystemNoticeSink,
};
