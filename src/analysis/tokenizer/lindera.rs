use std::borrow::Cow;
use std::str::FromStr;

use lindera::dictionary::{load_dictionary, load_user_dictionary};
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;

use crate::analysis::token::{Token, TokenStream};
use crate::error::{KumoError, Result};

use super::Tokenizer;

/// Dictionary used when none is configured. IPADIC tags nouns as
/// `名詞,一般` / `名詞,固有名詞`, which is what the noun policy expects.
pub const DEFAULT_DICTIONARY: &str = "embedded://ipadic";

/// Segmentation mode used when none is configured.
pub const DEFAULT_MODE: &str = "normal";

/// Tokenizer backed by a lindera segmenter.
///
/// The segmenter and its dictionary are owned by this value and released
/// when it is dropped.
pub struct LinderaTokenizer {
    inner: Segmenter,
}

impl LinderaTokenizer {
    /// Create a new Lindera tokenizer.
    ///
    /// `dict_uri` is either an `embedded://` URI or the path of a compiled
    /// lindera dictionary directory.
    pub fn new(mode_str: &str, dict_uri: &str, user_dict_uri: Option<&str>) -> Result<Self> {
        let mode = Mode::from_str(mode_str).map_err(|e| {
            KumoError::analyzer_init(format!("Invalid mode '{}': {}", mode_str, e))
        })?;
        let dict = load_dictionary(dict_uri).map_err(|e| {
            KumoError::analyzer_init(format!(
                "Failed to load dictionary '{}': {}",
                dict_uri, e
            ))
        })?;
        let metadata = &dict.metadata;
        let user_dict = match user_dict_uri {
            Some(uri) => Some(load_user_dictionary(uri, metadata).map_err(|e| {
                KumoError::analyzer_init(format!("Failed to load user dictionary: {}", e))
            })?),
            None => None,
        };
        let inner = Segmenter::new(mode, dict, user_dict);

        Ok(Self { inner })
    }

    /// Create a tokenizer with the embedded IPADIC dictionary in normal mode.
    pub fn ipadic() -> Result<Self> {
        Self::new(DEFAULT_MODE, DEFAULT_DICTIONARY, None)
    }
}

impl Tokenizer for LinderaTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let mut tokens = Vec::new();

        for mut token in self
            .inner
            .segment(Cow::Borrowed(text))
            .map_err(|e| KumoError::parse(format!("Failed to segment text: {}", e)))?
        {
            let features: Vec<String> = token.details().iter().map(|d| d.to_string()).collect();
            tokens.push(
                Token::with_offsets(
                    token.surface.as_ref(),
                    token.position,
                    token.byte_start,
                    token.byte_end,
                )
                .with_features(features),
            );
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lindera"
    }
}
