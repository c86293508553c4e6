use std::sync::LazyLock;
use tiktoken_rs::CoreBPE;

use crate::application::ports::CompletionRequest;

static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::cl100k_base().expect("Failed to initialize cl100k_base tokenizer")
});

pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// Approximate prompt size of a request. Providers tokenize differently, so
/// this is only used to log how close a call is to a tokens-per-minute cap.
pub fn estimate_request_tokens(request: &CompletionRequest) -> usize {
    count_tokens(&request.system_prompt) + count_tokens(&request.user_prompt)
}
