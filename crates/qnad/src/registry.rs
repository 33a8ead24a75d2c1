//! Handler registration keyed by content type.
//!
//! Handlers are registered while the daemon is being configured. Once the
//! registry is handed to [`crate::Server`] it is frozen behind an `Arc` and
//! only read during dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use qna_wire::{ContentType, Envelope};
use tracing::debug;

const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Key under which a handler is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerTag {
    /// Handles text requests.
    Text,
    /// Handles binary requests.
    Binary,
    /// Fallback for requests with no exact handler. Never appears on the wire.
    Any,
}

impl HandlerTag {
    /// Returns a short label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Binary => "binary",
            Self::Any => "any",
        }
    }
}

impl From<ContentType> for HandlerTag {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Text => Self::Text,
            ContentType::Binary => Self::Binary,
        }
    }
}

impl fmt::Display for HandlerTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// What a handler wants sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Close the connection without sending a response frame.
    None,
    /// Send this envelope back to the client.
    Respond(Envelope),
}

impl Reply {
    /// Sends nothing back.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Responds with a text envelope.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Respond(Envelope::text(content))
    }

    /// Responds with a binary envelope.
    #[must_use]
    pub fn binary(content: impl Into<Vec<u8>>) -> Self {
        Self::Respond(Envelope::binary(content))
    }

    /// Returns the envelope to send, if any.
    #[must_use]
    pub fn into_envelope(self) -> Option<Envelope> {
        match self {
            Self::None => None,
            Self::Respond(envelope) => Some(envelope),
        }
    }
}

impl From<Envelope> for Reply {
    fn from(envelope: Envelope) -> Self {
        Self::Respond(envelope)
    }
}

impl From<Option<Envelope>> for Reply {
    fn from(envelope: Option<Envelope>) -> Self {
        envelope.map_or(Self::None, Self::Respond)
    }
}

impl From<String> for Reply {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

impl From<&str> for Reply {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<Vec<u8>> for Reply {
    fn from(content: Vec<u8>) -> Self {
        Self::binary(content)
    }
}

/// Error returned by a handler. Its display text is sent to the client.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a handler.
pub type HandlerResult = Result<Reply, HandlerError>;

/// A request handler bound to a [`HandlerTag`].
///
/// The handler receives the decoded request. A text request arrives as
/// [`Envelope::Text`] and a binary request as [`Envelope::Binary`].
pub trait Handler: Send + Sync + 'static {
    /// Handles one request.
    ///
    /// # Errors
    ///
    /// Any error is reported to the client as a text envelope and does not
    /// affect other connections.
    fn handle(&self, request: Envelope) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(Envelope) -> HandlerResult + Send + Sync + 'static,
{
    fn handle(&self, request: Envelope) -> HandlerResult {
        self(request)
    }
}

/// Mapping from [`HandlerTag`] to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerTag, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure for `tag`, replacing any previous handler.
    pub fn register<F>(&mut self, tag: HandlerTag, handler: F) -> &mut Self
    where
        F: Fn(Envelope) -> HandlerResult + Send + Sync + 'static,
    {
        self.register_handler(tag, Arc::new(handler))
    }

    /// Registers a shared handler for `tag`, replacing any previous handler.
    pub fn register_handler(&mut self, tag: HandlerTag, handler: Arc<dyn Handler>) -> &mut Self {
        if self.handlers.insert(tag, handler).is_some() {
            debug!(target: REGISTRY_TARGET, tag = tag.as_str(), "replaced handler");
        } else {
            debug!(target: REGISTRY_TARGET, tag = tag.as_str(), "registered handler");
        }
        self
    }

    /// Builder-style variant of [`HandlerRegistry::register`].
    #[must_use]
    pub fn with<F>(mut self, tag: HandlerTag, handler: F) -> Self
    where
        F: Fn(Envelope) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(tag, handler);
        self
    }

    /// Looks up the handler for an incoming content type.
    ///
    /// The exact tag wins; otherwise the [`HandlerTag::Any`] handler is used.
    /// Returns `None` when neither is registered.
    #[must_use]
    pub fn resolve(&self, content_type: ContentType) -> Option<Arc<dyn Handler>> {
        self.handlers
            .get(&HandlerTag::from(content_type))
            .or_else(|| self.handlers.get(&HandlerTag::Any))
            .cloned()
    }

    /// Returns `true` when a handler is registered for exactly `tag`.
    #[must_use]
    pub fn contains(&self, tag: HandlerTag) -> bool {
        self.handlers.contains_key(&tag)
    }

    /// Returns `true` when no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.handlers.keys().map(|tag| tag.as_str()).collect();
        tags.sort_unstable();
        formatter
            .debug_struct("HandlerRegistry")
            .field("tags", &tags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn answer(label: &'static str) -> impl Fn(Envelope) -> HandlerResult + Send + Sync + 'static {
        move |_request| Ok(Reply::text(label))
    }

    fn resolved_label(registry: &HandlerRegistry, content_type: ContentType) -> Option<String> {
        let handler = registry.resolve(content_type)?;
        let reply = handler
            .handle(Envelope::text("probe"))
            .expect("test handlers succeed");
        reply
            .into_envelope()
            .and_then(|envelope| envelope.as_text().map(str::to_owned))
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve(ContentType::Text).is_none());
        assert!(registry.resolve(ContentType::Binary).is_none());
    }

    #[rstest]
    #[case(ContentType::Text, Some("text"))]
    #[case(ContentType::Binary, None)]
    fn exact_tag_only(#[case] content_type: ContentType, #[case] expected: Option<&str>) {
        let registry = HandlerRegistry::new().with(HandlerTag::Text, answer("text"));
        assert_eq!(
            resolved_label(&registry, content_type).as_deref(),
            expected
        );
    }

    #[rstest]
    #[case(ContentType::Text, "text")]
    #[case(ContentType::Binary, "any")]
    fn exact_tag_beats_wildcard(#[case] content_type: ContentType, #[case] expected: &str) {
        let registry = HandlerRegistry::new()
            .with(HandlerTag::Any, answer("any"))
            .with(HandlerTag::Text, answer("text"));
        assert_eq!(
            resolved_label(&registry, content_type).as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn re_registration_replaces_handler() {
        let mut registry = HandlerRegistry::new();
        registry
            .register(HandlerTag::Binary, answer("first"))
            .register(HandlerTag::Binary, answer("second"));
        assert_eq!(
            resolved_label(&registry, ContentType::Binary).as_deref(),
            Some("second")
        );
        assert!(registry.contains(HandlerTag::Binary));
        assert!(!registry.contains(HandlerTag::Any));
    }

    #[test]
    fn reply_conversions_infer_content_type() {
        assert_eq!(Reply::from("hi"), Reply::Respond(Envelope::text("hi")));
        assert_eq!(Reply::from(vec![1_u8]), Reply::Respond(Envelope::binary([1_u8])));
        assert_eq!(Reply::from(None::<Envelope>), Reply::None);
        assert_eq!(Reply::none().into_envelope(), None);
    }

    #[test]
    fn debug_lists_registered_tags() {
        let registry = HandlerRegistry::new()
            .with(HandlerTag::Text, answer("text"))
            .with(HandlerTag::Any, answer("any"));
        assert_eq!(
            format!("{registry:?}"),
            r#"HandlerRegistry { tags: ["any", "text"] }"#
        );
    }
}
