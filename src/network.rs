//! Network adapters: fetch-and-decode and encode-and-upload over any byte
//! transport.
//!
//! [`Transport`] is the only seam; [`TransportExt`] layers the codec
//! capabilities on top of it for every implementation. [`HttpTransport`]
//! (feature `http`) is the stock implementation over a blocking reqwest
//! client.

use crate::error::{NetworkError, TransportError};
use crate::json::{JsonDecodable, JsonEncodable, MultiJsonDecodable, MultiJsonEncodable};
use crate::plist::{MultiPlistDecodable, MultiPlistEncodable, PlistDecodable, PlistEncodable};
use crate::provider::{Decoder, Encoder};
use crate::selector::{DecoderSelector, EncoderSelector};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Moves raw bytes to and from a URL.
pub trait Transport {
    /// Fetch the body at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// Send `body` to `url` and return the response body. The request method
    /// is up to the implementation; [`HttpTransport`] always POSTs.
    fn send(&self, url: &str, body: Vec<u8>, content_type: &str)
    -> Result<Vec<u8>, TransportError>;
}

/// Codec-aware helpers available on every [`Transport`].
pub trait TransportExt: Transport {
    fn fetch_with<T, D>(&self, url: &str, decoder: &D) -> Result<T, NetworkError>
    where
        T: DeserializeOwned,
        D: Decoder,
    {
        let body = self.fetch(url)?;
        debug!(url, format = %decoder.format(), len = body.len(), "decoding response");
        Ok(decoder.decode(&body)?)
    }

    fn fetch_json<T: JsonDecodable>(&self, url: &str) -> Result<T, NetworkError> {
        self.fetch_with(url, &T::json_decoder())
    }

    fn fetch_json_using<T: MultiJsonDecodable>(
        &self,
        url: &str,
        using: T::JsonDecoders,
    ) -> Result<T, NetworkError> {
        self.fetch_with(url, &using.decoder())
    }

    fn fetch_plist<T: PlistDecodable>(&self, url: &str) -> Result<T, NetworkError> {
        self.fetch_with(url, &T::plist_decoder())
    }

    fn fetch_plist_using<T: MultiPlistDecodable>(
        &self,
        url: &str,
        using: T::PlistDecoders,
    ) -> Result<T, NetworkError> {
        self.fetch_with(url, &using.decoder())
    }

    /// Encode `value` and send it; returns the raw response body.
    fn upload_with<T, E>(&self, url: &str, value: &T, encoder: &E) -> Result<Vec<u8>, NetworkError>
    where
        T: Serialize + ?Sized,
        E: Encoder,
    {
        let format = encoder.format();
        let body = encoder.encode(value)?;
        debug!(url, %format, len = body.len(), "uploading");
        Ok(self.send(url, body, format.content_type())?)
    }

    fn upload_json<T: JsonEncodable + ?Sized>(
        &self,
        url: &str,
        value: &T,
    ) -> Result<Vec<u8>, NetworkError> {
        self.upload_with(url, value, &T::json_encoder())
    }

    fn upload_json_using<T: MultiJsonEncodable + ?Sized>(
        &self,
        url: &str,
        value: &T,
        using: T::JsonEncoders,
    ) -> Result<Vec<u8>, NetworkError> {
        self.upload_with(url, value, &using.encoder())
    }

    fn upload_plist<T: PlistEncodable + ?Sized>(
        &self,
        url: &str,
        value: &T,
    ) -> Result<Vec<u8>, NetworkError> {
        self.upload_with(url, value, &T::plist_encoder())
    }

    fn upload_plist_using<T: MultiPlistEncodable + ?Sized>(
        &self,
        url: &str,
        value: &T,
        using: T::PlistEncoders,
    ) -> Result<Vec<u8>, NetworkError> {
        self.upload_with(url, value, &using.encoder())
    }

    /// Encode `value`, send it, and decode the response.
    ///
    /// Request and response formats are independent, so any combination of
    /// JSON and plist providers works, e.g.
    /// `exchange(url, &req, &Req::json_encoder(), &Resp::plist_decoder())`.
    fn exchange<T, R, E, D>(
        &self,
        url: &str,
        value: &T,
        encoder: &E,
        decoder: &D,
    ) -> Result<R, NetworkError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
        E: Encoder,
        D: Decoder,
    {
        let body = self.upload_with(url, value, encoder)?;
        debug!(url, format = %decoder.format(), len = body.len(), "decoding response");
        Ok(decoder.decode(&body)?)
    }
}

impl<X: Transport + ?Sized> TransportExt for X {}

#[cfg(feature = "http")]
pub use http::HttpTransport;

#[cfg(feature = "http")]
mod http {
    use super::Transport;
    use crate::error::{NetworkError, TransportError};
    use crate::provider::Decoder;
    use reqwest::blocking::{Client, RequestBuilder, Response};
    use reqwest::header::CONTENT_TYPE;
    use serde::de::DeserializeOwned;
    use tracing::debug;

    /// [`Transport`] over HTTP: `fetch` is a GET, `send` is a POST. Any
    /// non-2xx status is a [`TransportError::Status`].
    ///
    /// Other methods, headers or timeouts go through [`execute`](Self::execute)
    /// with a request built on [`client`](Self::client).
    #[derive(Clone, Debug, Default)]
    pub struct HttpTransport {
        client: Client,
    }

    impl HttpTransport {
        pub fn new() -> Self {
            Self::with_client(Client::new())
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }

        pub fn client(&self) -> &Client {
            &self.client
        }

        /// Send a prepared request and return the response body, with the
        /// same status handling as the [`Transport`] methods.
        pub fn execute(&self, request: RequestBuilder) -> Result<Vec<u8>, TransportError> {
            let request = request.build().map_err(|source| {
                let url = source.url().map(|url| url.to_string()).unwrap_or_default();
                http_error(&url, source)
            })?;
            let url = request.url().to_string();
            debug!(%url, method = %request.method(), "executing request");
            let response = self
                .client
                .execute(request)
                .map_err(|source| http_error(&url, source))?;
            read_body(&url, response)
        }

        /// [`execute`](Self::execute), then decode the body with `decoder`.
        pub fn execute_with<T, D>(
            &self,
            request: RequestBuilder,
            decoder: &D,
        ) -> Result<T, NetworkError>
        where
            T: DeserializeOwned,
            D: Decoder,
        {
            let body = self.execute(request)?;
            Ok(decoder.decode(&body)?)
        }
    }

    impl Transport for HttpTransport {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|source| http_error(url, source))?;
            read_body(url, response)
        }

        fn send(
            &self,
            url: &str,
            body: Vec<u8>,
            content_type: &str,
        ) -> Result<Vec<u8>, TransportError> {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, content_type)
                .body(body)
                .send()
                .map_err(|source| http_error(url, source))?;
            read_body(url, response)
        }
    }

    fn read_body(url: &str, response: Response) -> Result<Vec<u8>, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(|source| http_error(url, source))?;
        Ok(bytes.to_vec())
    }

    fn http_error(url: &str, source: reqwest::Error) -> TransportError {
        TransportError::Http {
            url: url.to_string(),
            source,
        }
    }
}
