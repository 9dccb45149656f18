#![allow(
    clippy::module_name_repetitions,
    reason = "Response suffix is intentional for clarity"
)]

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{TimestampMilliSeconds, serde_as};

use crate::margin::types::TransactionStatus;
use crate::types::Decimal;

/// Returned by transfers, loans and repayments.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub tran_id: i64,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Builder, PartialEq)]
pub struct LoansResponse {
    #[serde(default)]
    pub rows: Vec<Loan>,
    pub total: i64,
}

#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
pub struct Loan {
    pub asset: String,
    pub principal: Decimal,
    #[serde_as(as = "TimestampMilliSeconds")]
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
}

#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Builder, PartialEq)]
pub struct RepaysResponse {
    #[serde(default)]
    pub rows: Vec<Repay>,
    pub total: i64,
}

#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Repay {
    pub asset: String,
    /// Total repaid, principal plus interest
    pub amount: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    #[serde_as(as = "TimestampMilliSeconds")]
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    pub tx_id: i64,
}

/// Cross margin account summary. Totals are denominated in BTC.
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub borrow_enabled: bool,
    pub margin_level: Decimal,
    #[serde(rename = "totalAssetOfBtc")]
    pub total_asset_of_btc: Decimal,
    #[serde(rename = "totalLiabilityOfBtc")]
    pub total_liability_of_btc: Decimal,
    #[serde(rename = "totalNetAssetOfBtc")]
    pub total_net_asset_of_btc: Decimal,
    pub trade_enabled: bool,
    pub transfer_enabled: bool,
    #[serde(default)]
    pub user_assets: Vec<UserAsset>,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAsset {
    pub asset: String,
    pub borrowed: Decimal,
    pub free: Decimal,
    pub interest: Decimal,
    pub locked: Decimal,
    pub net_asset: Decimal,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(rename = "assetFullName")]
    pub full_name: String,
    #[serde(rename = "assetName")]
    pub name: String,
    #[serde(rename = "isBorrowable")]
    pub borrowable: bool,
    #[serde(rename = "isMortgageable")]
    pub mortgageable: bool,
    pub user_min_borrow: Decimal,
    pub user_min_repay: Decimal,
}

#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub id: i64,
    pub symbol: String,
    pub base: String,
    pub quote: String,
    pub is_margin_trade: bool,
    pub is_buy_allowed: bool,
    pub is_sell_allowed: bool,
}

#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Builder, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceIndex {
    #[serde_as(as = "TimestampMilliSeconds")]
    pub calc_time: DateTime<Utc>,
    pub price: Decimal,
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::types::to_datetime;

    #[test]
    fn repays_should_deserialize() -> crate::Result<()> {
        let json = r#"{
            "rows": [
                {
                    "amount": "14.00000000",
                    "asset": "BNB",
                    "interest": "0.01866667",
                    "principal": "13.98133333",
                    "status": "CONFIRMED",
                    "timestamp": 1563438204000,
                    "txId": 2970933056
                }
            ],
            "total": 1
        }"#;

        let response: RepaysResponse = crate::decode(json.as_bytes())?;

        assert_eq!(response.total, 1);
        let repay = &response.rows[0];
        assert_eq!(repay.amount, dec!(14.00000000));
        assert_eq!(repay.interest, dec!(0.01866667));
        assert_eq!(repay.status, TransactionStatus::Confirmed);
        assert_eq!(repay.tx_id, 2_970_933_056);
        assert_eq!(Some(repay.timestamp), to_datetime(1_563_438_204_000));

        Ok(())
    }

    #[test]
    fn asset_fields_are_renamed() -> crate::Result<()> {
        let json = r#"{
            "assetFullName": "Binance Coin",
            "assetName": "BNB",
            "isBorrowable": false,
            "isMortgageable": true,
            "userMinBorrow": "0.00000000",
            "userMinRepay": "0.00000000"
        }"#;

        let asset: Asset = crate::decode(json.as_bytes())?;

        assert_eq!(asset.full_name, "Binance Coin");
        assert_eq!(asset.name, "BNB");
        assert!(!asset.borrowable);
        assert!(asset.mortgageable);
        assert_eq!(asset.user_min_borrow, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn empty_history_should_deserialize() -> crate::Result<()> {
        let response: LoansResponse = crate::decode(br#"{"total": 0}"#)?;

        assert_eq!(response, LoansResponse::default());

        Ok(())
    }
}
