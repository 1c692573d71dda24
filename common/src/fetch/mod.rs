use serde::Serialize;

/// Progress of one request in a batch that is fetched concurrently.
///
/// Each item settles on its own, so one failure never hides the others.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FetchState<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchState::Pending)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }
}

/// Ticket handed out for a request so its response can be matched later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Orders requests issued for the same slot of state.
///
/// Each new request supersedes the previous ones; responses that come back
/// for a superseded token must be dropped so a slow, stale answer cannot
/// overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Supersedes every outstanding request without starting a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}
