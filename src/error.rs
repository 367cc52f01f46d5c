use thiserror::Error;

/// Failure talking to the graph or chat service.
#[derive(Error, Debug)]
pub enum ApiError {
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("{url} responded with HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("unexpected response body from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: reqwest::Error,
	},
}
