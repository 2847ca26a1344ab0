//! Fitting extracted text into a model's context window.
//!
//! Text is measured with the cl100k BPE, which is close enough for the hosted
//! models to size a single request. Anything over budget is cut at a token
//! boundary; nothing is chunked.

use std::{borrow::Cow, sync::LazyLock};

use another_tiktoken_rs::{cl100k_base, CoreBPE};

pub const DEFAULT_CONTEXT_WINDOW: usize = 8_192;

/// Tokens kept free for the template wrapper on top of twice the word target
const PROMPT_RESERVE_TOKENS: usize = 512;

const KNOWN_CONTEXT_WINDOWS: [(&str, usize); 3] = [
    ("deepseek-r1-distill-qwen-32b", 128_000),
    ("llama3-70b-8192", 8_192),
    ("mixtral-8x7b-32768", 32_768),
];

static TOKENIZER: LazyLock<CoreBPE> =
    LazyLock::new(|| cl100k_base().expect("bundled cl100k vocabulary should load"));

pub fn context_window(model: &str) -> usize {
    KNOWN_CONTEXT_WINDOWS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, window)| *window)
        .unwrap_or(DEFAULT_CONTEXT_WINDOW)
}

/// Tokens left for the content once the template and the completion are
/// accounted for
pub fn input_budget(context_window: usize, summary_length: u16) -> usize {
    context_window.saturating_sub(PROMPT_RESERVE_TOKENS + 2 * summary_length as usize)
}

pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_ordinary(text).len()
}

/// Returns `text` unchanged when it fits `budget` tokens, otherwise its
/// longest prefix that does
pub fn truncate_to_budget(text: &str, budget: usize) -> Cow<'_, str> {
    let tokens = TOKENIZER.encode_ordinary(text);
    if tokens.len() <= budget {
        return Cow::Borrowed(text);
    }

    tracing::warn!(
        tokens = tokens.len(),
        budget,
        "Extracted text exceeds the model's input budget, truncating"
    );

    // a cut inside a multi-byte character does not decode, so back off one
    // token at a time until the prefix is valid utf-8 and still fits
    let mut end = budget;
    while end > 0 {
        match TOKENIZER.decode(tokens[..end].to_vec()) {
            Ok(truncated) if count_tokens(&truncated) <= budget => {
                return Cow::Owned(truncated);
            }
            Ok(_) => tracing::debug!(end, "Truncated prefix re-encodes over budget"),
            Err(e) => tracing::debug!(end, error = %e, "Token boundary is not valid utf-8"),
        }
        end -= 1;
    }

    Cow::Borrowed("")
}
