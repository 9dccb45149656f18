use crate::Result;
use crate::auth::Credentials;
use crate::client::{Client as RestClient, Config};
use crate::margin::types::{
    Account, AccountRequest, Asset, AssetRequest, LoanRequest, LoansRequest, LoansResponse, Pair,
    PairRequest, PriceIndex, PriceIndexRequest, RepayRequest, RepaysRequest, RepaysResponse,
    TransactionResponse, TransferRequest,
};

/// Client for the cross margin endpoints.
///
/// Every call goes through the wrapped [`RestClient`], so signing, `recvWindow` and timeouts
/// follow its [`Config`].
#[derive(Clone, Debug, Default)]
pub struct Client {
    client: RestClient,
}

impl From<RestClient> for Client {
    fn from(client: RestClient) -> Self {
        Self { client }
    }
}

impl Client {
    pub fn new(host: &str, config: Config, credentials: Credentials) -> Result<Client> {
        Ok(Self {
            client: RestClient::with_credentials(host, config, credentials)?,
        })
    }

    /// Returns the underlying REST client.
    #[must_use]
    pub fn inner(&self) -> &RestClient {
        &self.client
    }

    /// Moves an asset between the spot and the margin account.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransactionResponse> {
        self.client.send(request).await
    }

    /// Borrows an asset against the margin account.
    pub async fn loan(&self, request: &LoanRequest) -> Result<TransactionResponse> {
        self.client.send(request).await
    }

    /// Repays a previously borrowed asset.
    pub async fn repay(&self, request: &RepayRequest) -> Result<TransactionResponse> {
        self.client.send(request).await
    }

    pub async fn loans(&self, request: &LoansRequest) -> Result<LoansResponse> {
        self.client.send(request).await
    }

    pub async fn repays(&self, request: &RepaysRequest) -> Result<RepaysResponse> {
        self.client.send(request).await
    }

    pub async fn account(&self) -> Result<Account> {
        self.client.send(&AccountRequest).await
    }

    pub async fn asset(&self, request: &AssetRequest) -> Result<Asset> {
        self.client.send(request).await
    }

    pub async fn pair(&self, request: &PairRequest) -> Result<Pair> {
        self.client.send(request).await
    }

    pub async fn price_index(&self, request: &PriceIndexRequest) -> Result<PriceIndex> {
        self.client.send(request).await
    }
}
