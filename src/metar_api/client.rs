// metar_api - HTTP lookup service for raw METAR reports
//
// Copyright 2024 The metar_api Authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode, Url};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    InvalidIcao(String),
    Unexpected(StatusCode, Url),
    Timeout,
    Connect,
    MetarNotFound(Url),
    StationMismatch(Icao),
    Internal(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIcao(s) => write!(f, "invalid ICAO code {}", s),
            Self::Unexpected(status, url) => write!(f, "unexpected status {} for {}", status, url),
            Self::Timeout => write!(f, "timed out fetching page"),
            Self::Connect => write!(f, "unable to connect to page"),
            Self::MetarNotFound(url) => write!(f, "no raw METAR found on {}", url),
            Self::StationMismatch(icao) => write!(f, "page METAR does not match station {}", icao),
            Self::Internal(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Internal(e) => Some(e),
            _ => None,
        }
    }
}

/// A validated 4-letter airport identifier, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icao(String);

impl Icao {
    /// Validate and normalize an ICAO code. Accepts any casing but requires
    /// exactly four ASCII-alphabetic characters.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Icao(raw.to_ascii_uppercase()))
        } else {
            Err(ClientError::InvalidIcao(raw.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Icao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A raw METAR report as scraped from the upstream page. The text is trimmed
/// and always starts with the uppercase station code.
#[derive(Serialize, Deserialize, Debug)]
pub struct MetarReport {
    pub icao: Icao,
    #[serde(rename = "metar")]
    pub raw: String,
}

#[derive(Debug)]
pub struct MetarClient {
    client: Client,
    base_url: Url,
}

impl MetarClient {
    // The upstream filters non-browser clients, so requests go out with a
    // desktop Chrome User-Agent.
    const USER_AGENT: &'static str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    pub fn new(client: Client, page_url: &str) -> Self {
        MetarClient {
            client,
            base_url: Url::parse(page_url).unwrap(),
        }
    }

    /// Fetch the upstream page for the given station and extract the raw
    /// METAR text from it.
    pub async fn metar(&self, icao: &Icao) -> Result<MetarReport, ClientError> {
        let page_url = self.page_url(icao);
        tracing::debug!(message = "making METAR page request", url = %page_url);

        let body = self.fetch_page(page_url.clone()).await?;
        let raw = first_header_cell(&body).ok_or(ClientError::MetarNotFound(page_url))?;
        if !raw.starts_with(icao.as_str()) {
            return Err(ClientError::StationMismatch(icao.clone()));
        }

        Ok(MetarReport {
            icao: icao.clone(),
            raw,
        })
    }

    async fn fetch_page(&self, url: Url) -> Result<String, ClientError> {
        let res = self
            .client
            .get(url.clone())
            .header(USER_AGENT, Self::USER_AGENT)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(ClientError::Unexpected(status, url));
        }

        res.text().await.map_err(classify_transport_error)
    }

    fn page_url(&self, icao: &Icao) -> Url {
        let mut url = self.base_url.clone();
        {
            url.query_pairs_mut().clear().append_pair("station", icao.as_str());
        }

        url
    }
}

fn classify_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Connect
    } else {
        ClientError::Internal(e)
    }
}

/// Return the trimmed text of the first `<th>` element in the document, if
/// there is one.
///
/// The upstream page places the raw METAR in its first table header cell.
/// That layout is an undocumented contract owned by the upstream site and
/// may change without notice.
pub fn first_header_cell(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("th").unwrap();

    document
        .select(&selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_owned())
}
