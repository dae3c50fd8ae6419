use std::time::Duration;

use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tonic::async_trait;
use tonic::codec::CompressionEncoding;
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;
use tonic::transport::ClientTlsConfig;
use tonic::transport::Endpoint;
use tracing::debug;
use tracing::trace;

use crate::constants::REQUEST_PARAMS_HEADER;
use crate::constants::RESOURCE_PREFIX_HEADER;
use crate::proto::firestore_client::FirestoreClient;
use crate::proto::ListenRequest;
use crate::ConnectionParams;
use crate::ListenResponseStream;
use crate::ListenTransport;
use crate::NetworkError;
use crate::Result;
use crate::StreamError;

const AUTHORIZATION_HEADER: &str = "authorization";

/// Listen transport over a single shared gRPC channel.
///
/// The channel connects lazily and reconnects on its own, so a failed
/// connection attempt surfaces as an `UNAVAILABLE` stream failure and is
/// retried by the watch like any other transient error.
#[derive(Debug, Clone)]
pub struct GrpcListenTransport {
    channel: Channel,
    metadata: RoutingMetadata,
    enable_compression: bool,
}

#[derive(Debug, Clone)]
struct RoutingMetadata {
    resource_prefix: AsciiMetadataValue,
    request_params: AsciiMetadataValue,
    authorization: Option<AsciiMetadataValue>,
}

impl GrpcListenTransport {
    /// Builds the transport for `database` using the channel parameters in
    /// `params`. No connection is attempted until the first stream opens.
    pub fn new(
        database: &str,
        params: &ConnectionParams,
    ) -> Result<Self> {
        let channel = create_channel(params)?;
        let metadata = RoutingMetadata::new(database, params.auth_token.as_deref())?;
        debug!(endpoint = %params.endpoint, %database, "listen transport configured");

        Ok(Self {
            channel,
            metadata,
            enable_compression: params.enable_compression,
        })
    }
}

#[async_trait]
impl ListenTransport for GrpcListenTransport {
    async fn open(
        &self,
        requests: ReceiverStream<ListenRequest>,
    ) -> std::result::Result<ListenResponseStream, StreamError> {
        let mut client = FirestoreClient::new(self.channel.clone());
        if self.enable_compression {
            client = client
                .send_compressed(CompressionEncoding::Gzip)
                .accept_compressed(CompressionEncoding::Gzip);
        }

        let mut request = tonic::Request::new(requests);
        self.metadata.apply(request.metadata_mut());

        let response = client.listen(request).await?;
        trace!("listen stream established");

        Ok(response
            .into_inner()
            .map(|item| item.map_err(|status| Box::new(status) as StreamError))
            .boxed())
    }
}

impl RoutingMetadata {
    fn new(
        database: &str,
        auth_token: Option<&str>,
    ) -> Result<Self> {
        let resource_prefix = ascii(RESOURCE_PREFIX_HEADER, database.to_string())?;
        let request_params = ascii(REQUEST_PARAMS_HEADER, format!("database={database}"))?;
        let authorization = auth_token
            .map(|token| ascii(AUTHORIZATION_HEADER, format!("Bearer {token}")))
            .transpose()?;

        Ok(Self {
            resource_prefix,
            request_params,
            authorization,
        })
    }

    fn apply(
        &self,
        metadata: &mut tonic::metadata::MetadataMap,
    ) {
        metadata.insert(RESOURCE_PREFIX_HEADER, self.resource_prefix.clone());
        metadata.insert(REQUEST_PARAMS_HEADER, self.request_params.clone());
        if let Some(authorization) = &self.authorization {
            metadata.insert(AUTHORIZATION_HEADER, authorization.clone());
        }
    }
}

fn ascii(
    key: &'static str,
    value: String,
) -> Result<AsciiMetadataValue> {
    AsciiMetadataValue::try_from(value).map_err(|_| NetworkError::InvalidMetadata { key }.into())
}

/// Create pre-configured endpoint
fn create_channel(params: &ConnectionParams) -> Result<Channel> {
    let mut endpoint = Endpoint::from_shared(params.endpoint.clone())
        .map_err(|_| NetworkError::InvalidURI(params.endpoint.clone()))?
        .connect_timeout(Duration::from_millis(params.connect_timeout_in_ms))
        .tcp_keepalive(Some(Duration::from_secs(params.tcp_keepalive_in_secs)))
        .http2_keep_alive_interval(Duration::from_secs(params.http2_keep_alive_interval_in_secs))
        .keep_alive_timeout(Duration::from_secs(params.http2_keep_alive_timeout_in_secs))
        .keep_alive_while_idle(true);

    if params.endpoint.starts_with("https://") {
        endpoint = endpoint.tls_config(ClientTlsConfig::new().with_webpki_roots())?;
    }

    Ok(endpoint.connect_lazy())
}
