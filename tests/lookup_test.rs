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

use httpmock::prelude::*;
use metar_api::client::{ClientError, Icao, MetarClient};
use reqwest::Client;
use std::time::Duration;

const KSFO_PAGE: &str = "<html><body><table><tr>\
    <th>KSFO 121651Z 10008KT 10SM FEW200 19/12 A3004</th>\
    </tr></table></body></html>";

fn new_client(server: &MockServer) -> MetarClient {
    MetarClient::new(Client::new(), &server.url("/decodemet.php"))
}

#[tokio::test]
async fn test_metar_success() {
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET)
            .path("/decodemet.php")
            .query_param("station", "KSFO");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(KSFO_PAGE);
    });

    let client = new_client(&server);
    let icao = Icao::parse("KSFO").unwrap();
    let report = client.metar(&icao).await.unwrap();

    page.assert();
    assert_eq!("KSFO", report.icao.as_str());
    assert_eq!("KSFO 121651Z 10008KT 10SM FEW200 19/12 A3004", report.raw);
}

#[tokio::test]
async fn test_metar_uppercases_station_query() {
    // Lowercase input must still produce an uppercase station parameter;
    // the mock only matches the uppercase form.
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET)
            .path("/decodemet.php")
            .query_param("station", "KSFO");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(KSFO_PAGE);
    });

    let client = new_client(&server);
    let icao = Icao::parse("ksfo").unwrap();
    let report = client.metar(&icao).await.unwrap();

    page.assert();
    assert_eq!("KSFO", report.icao.as_str());
}

#[tokio::test]
async fn test_metar_sends_browser_user_agent() {
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET)
            .path("/decodemet.php")
            .header(
                "user-agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            );
        then.status(200)
            .header("Content-Type", "text/html")
            .body(KSFO_PAGE);
    });

    let client = new_client(&server);
    let icao = Icao::parse("KSFO").unwrap();
    client.metar(&icao).await.unwrap();

    page.assert();
}

#[tokio::test]
async fn test_metar_page_without_header_cell() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/decodemet.php");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body><p>No data available</p></body></html>");
    });

    let client = new_client(&server);
    let icao = Icao::parse("KSFO").unwrap();
    let res = client.metar(&icao).await;

    assert!(matches!(res, Err(ClientError::MetarNotFound(_))));
}

#[tokio::test]
async fn test_metar_station_mismatch() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/decodemet.php");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<table><tr><th>KXYZ 121651Z 10008KT</th></tr></table>");
    });

    let client = new_client(&server);
    let icao = Icao::parse("abcd").unwrap();
    let res = client.metar(&icao).await;

    assert!(matches!(res, Err(ClientError::StationMismatch(_))));
}

#[tokio::test]
async fn test_metar_upstream_error_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/decodemet.php");
        then.status(500).body("internal error");
    });

    let client = new_client(&server);
    let icao = Icao::parse("KSFO").unwrap();

    match client.metar(&icao).await {
        Err(ClientError::Unexpected(status, _)) => assert_eq!(500, status.as_u16()),
        other => panic!("expected unexpected-status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_metar_upstream_timeout() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/decodemet.php");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(KSFO_PAGE)
            .delay(Duration::from_secs(2));
    });

    let http_client = Client::builder()
        .timeout(Duration::from_millis(250))
        .build()
        .unwrap();
    let client = MetarClient::new(http_client, &server.url("/decodemet.php"));
    let icao = Icao::parse("KSFO").unwrap();
    let res = client.metar(&icao).await;

    assert!(matches!(res, Err(ClientError::Timeout)));
}
