//! Injected request context and outgoing transport.
//!
//! [`Response`](crate::Response) never reads or writes global request state;
//! the host passes a [`RequestContext`] for the incoming request and a
//! [`Transport`] for the outgoing exchange.

use std::borrow::Cow;

use crate::error::Result;

/// Read access to the incoming request's headers.
pub trait RequestContext {
    /// Looks up a header by case-insensitive name.
    ///
    /// A header sent more than once reads as its values joined with `", "`.
    fn header(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Sink for the outgoing status, headers and body.
pub trait Transport {
    fn write_status(&mut self, code: u16) -> Result<()>;

    /// Sets a header, replacing any previous value with the same name.
    fn write_header(&mut self, name: &str, value: &str) -> Result<()>;

    fn write_body(&mut self, body: Vec<u8>) -> Result<()>;
}

/// A plain list of request headers.
#[derive(Debug, Clone, Default)]
pub struct HeaderList {
    headers: Vec<(String, String)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl RequestContext for HeaderList {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        join_values(
            self.headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
        )
    }
}

/// Combines repeated header values into one, borrowing when there is only one.
pub(crate) fn join_values<'a>(
    mut values: impl Iterator<Item = &'a str>,
) -> Option<Cow<'a, str>> {
    let first = values.next()?;
    let Some(second) = values.next() else {
        return Some(Cow::Borrowed(first));
    };

    let mut joined = format!("{first}, {second}");
    for value in values {
        joined.push_str(", ");
        joined.push_str(value);
    }
    Some(Cow::Owned(joined))
}

/// Transport that records everything written to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    pub status: Option<u16>,
    /// Headers in the order first written.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordingTransport {
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.headers.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Transport for RecordingTransport {
    fn write_status(&mut self, code: u16) -> Result<()> {
        self.status = Some(code);
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<()> {
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn write_body(&mut self, body: Vec<u8>) -> Result<()> {
        self.body = body;
        Ok(())
    }
}
