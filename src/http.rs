//! Blocking HTTP GET seam shared by both resolvers.

use crate::location::LookupError;
use std::io::Read;
use std::time::Duration;

const USER_AGENT: &str = concat!("ip-lookup/", env!("CARGO_PKG_VERSION"));

/// Anything that can perform one GET and hand back the full body.
///
/// Implementations return `Ok` only for a 200 response whose body was read
/// to completion. The response is released before returning on every path.
pub trait Fetch {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, LookupError>;
}

/// Production fetcher backed by a `ureq` agent.
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(USER_AGENT)
            .max_idle_connections(0)
            .build();
        Self { agent }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, LookupError> {
        let response = match self.agent.get(url).timeout(timeout).call() {
            Ok(r) => r,
            Err(ureq::Error::Status(code, _)) => return Err(LookupError::Status(code)),
            Err(ureq::Error::Transport(t)) => return Err(LookupError::Network(t.to_string())),
        };

        // ureq only errors on 4xx/5xx; anything else that isn't 200 is still a miss.
        if response.status() != 200 {
            return Err(LookupError::Status(response.status()));
        }

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| LookupError::Body(e.to_string()))?;
        Ok(body)
    }
}

/// Scripted fetcher for unit tests. Replies are matched by URL substring.
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::cell::RefCell;

    pub(crate) enum Reply {
        Body(&'static str),
        Status(u16),
        /// Headers arrived but the body was cut short.
        BodyError,
        Network,
    }

    #[derive(Default)]
    pub(crate) struct StubFetch {
        routes: Vec<(&'static str, Reply)>,
        calls: RefCell<Vec<(String, Duration)>>,
    }

    impl StubFetch {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn route(mut self, url_part: &'static str, reply: Reply) -> Self {
            self.routes.push((url_part, reply));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(u, _)| u.clone()).collect()
        }

        pub(crate) fn timeouts(&self) -> Vec<Duration> {
            self.calls.borrow().iter().map(|(_, t)| *t).collect()
        }
    }

    impl Fetch for StubFetch {
        fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, LookupError> {
            self.calls.borrow_mut().push((url.to_string(), timeout));
            let reply = self
                .routes
                .iter()
                .find(|(part, _)| url.contains(part))
                .map(|(_, r)| r);
            match reply {
                Some(Reply::Body(b)) => Ok(b.as_bytes().to_vec()),
                Some(Reply::Status(code)) => Err(LookupError::Status(*code)),
                Some(Reply::BodyError) => {
                    Err(LookupError::Body("connection closed mid-body".into()))
                }
                Some(Reply::Network) | None => {
                    Err(LookupError::Network("connection refused".into()))
                }
            }
        }
    }
}
