//! Filling in the missing side of a card draft.

use crate::client::{TranslateRequest, TranslationClient, ENGLISH};
use crate::error::TranslateError;
use flashcarder_core::CardDraft;
use tracing::debug;

/// Translate whichever side of `draft` is filled into the empty one.
///
/// `language` is the deck's language code. The first side of the draft is
/// in that language unless the draft is English first. Drafts with both
/// sides filled, or neither, are returned unchanged.
pub async fn fill_missing_side<C>(
    client: &C,
    mut draft: CardDraft,
    language: &str,
) -> Result<CardDraft, TranslateError>
where
    C: TranslationClient + ?Sized,
{
    let (front_lang, back_lang) = if draft.is_english_first {
        (ENGLISH, language)
    } else {
        (language, ENGLISH)
    };

    let front = draft.front.trim();
    let back = draft.back.trim();
    match (front.is_empty(), back.is_empty()) {
        (false, true) => {
            debug!("Filling back side");
            let request = TranslateRequest::new(front, front_lang, back_lang);
            draft.back = client.translate(&request).await?;
        }
        (true, false) => {
            debug!("Filling front side");
            let request = TranslateRequest::new(back, back_lang, front_lang);
            draft.front = client.translate(&request).await?;
        }
        _ => {}
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTranslationClient;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn fills_english_from_native() {
        let mut client = MockTranslationClient::new();
        client
            .expect_translate()
            .with(eq(TranslateRequest::new("Hund", "de-DE", ENGLISH)))
            .times(1)
            .returning(|_| Ok("dog".to_string()));

        let draft = fill_missing_side(&client, CardDraft::new("Hund", ""), "de-DE")
            .await
            .unwrap();
        assert_eq!(draft.back, "dog");
    }

    #[tokio::test]
    async fn fills_native_from_english() {
        let mut client = MockTranslationClient::new();
        client
            .expect_translate()
            .with(eq(TranslateRequest::new("cat", ENGLISH, "fr-FR")))
            .times(1)
            .returning(|_| Ok("chat".to_string()));

        let draft = fill_missing_side(&client, CardDraft::new(" ", "cat"), "fr-FR")
            .await
            .unwrap();
        assert_eq!(draft.front, "chat");
    }

    #[tokio::test]
    async fn english_first_swaps_directions() {
        let mut client = MockTranslationClient::new();
        client
            .expect_translate()
            .with(eq(TranslateRequest::new("dog", ENGLISH, "de-DE")))
            .times(1)
            .returning(|_| Ok("Hund".to_string()));

        let draft = CardDraft::new("dog", "").english_first(true);
        let draft = fill_missing_side(&client, draft, "de-DE").await.unwrap();
        assert_eq!(draft.back, "Hund");
    }

    #[tokio::test]
    async fn complete_draft_is_untouched() {
        let mut client = MockTranslationClient::new();
        client.expect_translate().times(0);

        let draft = CardDraft::new("Hund", "dog");
        let out = fill_missing_side(&client, draft.clone(), "de-DE").await.unwrap();
        assert_eq!(out, draft);
    }

    #[tokio::test]
    async fn failure_is_returned() {
        let mut client = MockTranslationClient::new();
        client
            .expect_translate()
            .returning(|_| Err(TranslateError::Network("offline".into())));

        let err = fill_missing_side(&client, CardDraft::new("Hund", ""), "de-DE")
            .await
            .unwrap_err();
        assert_eq!(err, TranslateError::Network("offline".into()));
    }
}
