#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

use bon::Builder;
use reqwest::Method;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::Timestamp;
use crate::auth::SecurityLevel;
use crate::margin::types::TransferType;
use crate::margin::types::response::{
    Account, Asset, LoansResponse, Pair, PriceIndex, RepaysResponse, TransactionResponse,
};
use crate::request::Endpoint;
use crate::types::Decimal;

/// `POST /sapi/v1/margin/transfer`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct TransferRequest {
    pub asset: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
}

impl Endpoint for TransferRequest {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/sapi/v1/margin/transfer";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = TransactionResponse;
}

/// `POST /sapi/v1/margin/loan`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct LoanRequest {
    pub asset: String,
    pub amount: Decimal,
}

impl Endpoint for LoanRequest {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/sapi/v1/margin/loan";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = TransactionResponse;
}

/// `POST /sapi/v1/margin/repay`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct RepayRequest {
    pub asset: String,
    pub amount: Decimal,
}

impl Endpoint for RepayRequest {
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "/sapi/v1/margin/repay";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = TransactionResponse;
}

/// `GET /sapi/v1/margin/loan`
///
/// Without `tx_id`, `start_time` and `end_time` narrow the history; `current` is the 1-based
/// page and `size` the page length.
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct LoansRequest {
    pub asset: String,
    pub tx_id: Option<i64>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub current: Option<u32>,
    pub size: Option<u32>,
}

impl Endpoint for LoansRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/loan";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = LoansResponse;
}

/// `GET /sapi/v1/margin/repay`
#[non_exhaustive]
#[skip_serializing_none]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct RepaysRequest {
    pub asset: String,
    pub tx_id: Option<i64>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub current: Option<u32>,
    pub size: Option<u32>,
}

impl Endpoint for RepaysRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/repay";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = RepaysResponse;
}

/// `GET /sapi/v1/margin/account`
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AccountRequest;

impl Endpoint for AccountRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/account";
    const SECURITY: SecurityLevel = SecurityLevel::Signed;

    type Response = Account;
}

/// `GET /sapi/v1/margin/asset`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct AssetRequest {
    pub asset: String,
}

impl Endpoint for AssetRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/asset";
    const SECURITY: SecurityLevel = SecurityLevel::ApiKey;

    type Response = Asset;
}

/// `GET /sapi/v1/margin/pair`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct PairRequest {
    pub symbol: String,
}

impl Endpoint for PairRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/pair";
    const SECURITY: SecurityLevel = SecurityLevel::ApiKey;

    type Response = Pair;
}

/// `GET /sapi/v1/margin/priceIndex`
#[non_exhaustive]
#[derive(Debug, Serialize, Builder)]
#[builder(on(String, into))]
pub struct PriceIndexRequest {
    pub symbol: String,
}

impl Endpoint for PriceIndexRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/sapi/v1/margin/priceIndex";
    const SECURITY: SecurityLevel = SecurityLevel::ApiKey;

    type Response = PriceIndex;
}
