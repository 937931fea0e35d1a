use std::time::Duration;

use reqwest::Client;

pub fn build_http_client(disable_proxy: bool, timeout: Duration) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(concat!("bill-vote-lookup/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout);

    if disable_proxy {
        builder = builder.no_proxy();
    }

    builder.build()
}
