use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

pub mod request;
pub mod response;

pub use request::{
    AccountRequest, AssetRequest, LoanRequest, LoansRequest, PairRequest, PriceIndexRequest,
    RepayRequest, RepaysRequest, TransferRequest,
};
pub use response::{
    Account, Asset, Loan, LoansResponse, Pair, PriceIndex, Repay, RepaysResponse,
    TransactionResponse, UserAsset,
};

/// Direction of a margin transfer, sent as its integer code.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TransferType {
    /// Spot account to margin account
    ToMargin = 1,
    /// Margin account to spot account
    ToMain = 2,
}

/// Processing status of a loan or a repayment.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
    #[serde(other)]
    Unknown,
}
