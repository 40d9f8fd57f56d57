// ContentGenerator behaviour with a mock backend.

mod test_utils;

use autopx_core::TargetPlatform;
use autopx_error::{ErrorCategory, GenerationErrorKind};
use autopx_generation::{
    ContentGenerator, GeneratePost, GeneratePostInput, GeneratedPosts, UniversalPost,
    UniversalPostInput,
};
use serde_json::json;
use std::sync::Arc;
use test_utils::{MockBackend, MockResponse};

fn generator(backend: &Arc<MockBackend>) -> ContentGenerator {
    ContentGenerator::new(backend.clone())
}

#[tokio::test]
async fn test_both_platforms_end_to_end() -> anyhow::Result<()> {
    let backend = Arc::new(MockBackend::json(json!({
        "facebookPost": "Renewables are getting cheaper every year. Here's what that means for you.",
        "xPost": "Solar + wind are now the cheapest power in history. #RenewableEnergy"
    })));
    let input = GeneratePostInput::new(
        "The future of renewable energy",
        TargetPlatform::Both,
        Some("Casual".to_string()),
    );

    let posts = generator(&backend).run(&GeneratePost, &input).await?;

    let GeneratedPosts::Both {
        facebook_post,
        x_post,
    } = posts
    else {
        panic!("expected both posts");
    };
    assert!(!facebook_post.is_empty());
    assert!(!x_post.is_empty());
    assert_eq!(backend.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_x_only_drops_facebook_post() -> anyhow::Result<()> {
    let backend = Arc::new(MockBackend::json(json!({
        "facebookPost": "Not requested",
        "xPost": "Short and sharp."
    })));
    let input = GeneratePostInput::new("The future of renewable energy", TargetPlatform::X, None);

    let posts = generator(&backend).run(&GeneratePost, &input).await?;

    assert_eq!(
        serde_json::to_value(&posts)?,
        json!({"xPost": "Short and sharp."})
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_never_reaches_backend() -> anyhow::Result<()> {
    let backend = Arc::new(MockBackend::json(json!({"xPost": "unused"})));
    let input = GeneratePostInput::new("short", TargetPlatform::X, None);

    let err = generator(&backend)
        .run(&GeneratePost, &input)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::InvalidInput);
    assert_eq!(backend.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_is_reported_once() -> anyhow::Result<()> {
    let backend = Arc::new(MockBackend::error(GenerationErrorKind::BackendUnavailable(
        "503 Service Unavailable".to_string(),
    )));
    let input = GeneratePostInput::new("The future of renewable energy", TargetPlatform::X, None);

    let err = generator(&backend)
        .run(&GeneratePost, &input)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::BackendUnavailable);
    assert_eq!(backend.call_count(), 1, "no retries");
    Ok(())
}

#[tokio::test]
async fn test_missing_required_field_is_malformed() -> anyhow::Result<()> {
    let backend = Arc::new(MockBackend::json(json!({"facebookPost": "Only facebook"})));
    let input = GeneratePostInput::new("The future of renewable energy", TargetPlatform::Both, None);

    let err = generator(&backend)
        .run(&GeneratePost, &input)
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::MalformedOutput);
    Ok(())
}

#[tokio::test]
async fn test_identical_runs_are_independent() -> anyhow::Result<()> {
    let package = |script: &str| {
        MockResponse::Success(vec![autopx_core::Output::Json(json!({
            "titles": ["Why Most AI Advice Is Incomplete", "The Real Function of AI Tools"],
            "hashtags": ["#AI", "#MentalModels", "#Automation", "#peterdamianoHQ"],
            "shortFormScript": script,
            "longFormScript": "A longer walk through the same idea.",
            "onScreenCaptions": ["Tools amplify behavior.", "Fix the behavior first."],
            "postDescription": "A short summary. This is part of a larger framework."
        }))])
    };
    let backend = Arc::new(MockBackend::sequence(vec![
        package("First take."),
        package("Second take."),
    ]));
    let generator = generator(&backend);
    let input = UniversalPostInput::new("Why people misuse AI");
    let template = UniversalPost::default();

    let first = generator.run(&template, &input).await?;
    let second = generator.run(&template, &input).await?;

    assert_eq!(backend.call_count(), 2);
    assert_eq!(first.short_form_script, "First take.");
    assert_eq!(second.short_form_script, "Second take.");
    for package in [&first, &second] {
        assert!(package.long_form_script.is_some());
        assert!(
            package
                .hashtags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case("#peterdamianoHQ"))
        );
    }
    Ok(())
}
