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

//! HTTP lookup service for raw METAR reports
//!
//! ## Features
//!
//! `metar_api` exposes a single endpoint that returns the current raw METAR
//! for a 4-letter airport [ICAO code]. The report is scraped from a
//! third-party page that publishes decoded METARs; only the raw text is
//! returned, no decoding is performed.
//!
//! * `GET /metar/<icao>` - the station to look up, case insensitive.
//!
//! On success the response is `200` with a JSON body:
//!
//! ```json
//! {"icao": "KSFO", "metar": "KSFO 121651Z 10008KT 10SM FEW200 19/12 A3004"}
//! ```
//!
//! Failures are JSON bodies of the form `{"error": "<message>"}`:
//!
//! * `400` - the path segment is not a 4-letter alphabetic code.
//! * `404` - the page had no METAR cell, or its METAR is for a different
//!   station than the one requested.
//! * `503` - the upstream site could not be reached.
//! * `504` - the upstream fetch timed out.
//! * `500` - any other failure, with a short description.
//! * any other status - the upstream page answered non-200 and its status is
//!   passed through.
//!
//! [ICAO code]: https://en.wikipedia.org/wiki/ICAO_airport_code
//!
//! ## Build
//!
//! `metar_api` is a Rust program and must be built from source using a
//! [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! git clone git@github.com:metar-api/metar_api.git && cd metar_api
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! ```text
//! ./metar_api --bind 0.0.0.0:5000
//! curl -sS 'http://localhost:5000/metar/ksfo'
//! ```
//!
//! The upstream page, bind address, fetch timeout, and log level can all be
//! overridden; see `./metar_api --help`.
//!

pub mod client;
pub mod http;
