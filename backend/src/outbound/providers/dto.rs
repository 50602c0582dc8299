//! Request payloads for the JSON-speaking providers.

use serde::Serialize;

/// Google Vision `images:annotate` request.
#[derive(Debug, Serialize)]
pub(super) struct AnnotateRequestDto {
    requests: Vec<AnnotateImageDto>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageDto {
    image: ImageContentDto,
    features: Vec<FeatureDto>,
}

#[derive(Debug, Serialize)]
struct ImageContentDto {
    content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureDto {
    #[serde(rename = "type")]
    kind: &'static str,
    max_results: u32,
}

impl AnnotateRequestDto {
    pub(super) fn label_detection(content: String, max_results: u32) -> Self {
        Self {
            requests: vec![AnnotateImageDto {
                image: ImageContentDto { content },
                features: vec![FeatureDto {
                    kind: "LABEL_DETECTION",
                    max_results,
                }],
            }],
        }
    }
}

/// OpenAI chat completions request.
#[derive(Debug, Serialize)]
pub(super) struct ChatRequestDto<'a> {
    model: &'a str,
    messages: Vec<ChatMessageDto<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessageDto<'a> {
    role: &'static str,
    content: ChatContentDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContentDto<'a> {
    Text(&'a str),
    Parts(Vec<ChatPartDto<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ChatPartDto<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrlDto },
}

#[derive(Debug, Serialize)]
struct ImageUrlDto {
    url: String,
}

impl<'a> ChatRequestDto<'a> {
    pub(super) fn image_question(
        model: &'a str,
        system_prompt: &'a str,
        question: &'a str,
        image_data_url: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: ChatContentDto::Text(system_prompt),
                },
                ChatMessageDto {
                    role: "user",
                    content: ChatContentDto::Parts(vec![
                        ChatPartDto::Text { text: question },
                        ChatPartDto::ImageUrl {
                            image_url: ImageUrlDto {
                                url: image_data_url,
                            },
                        },
                    ]),
                },
            ],
            max_tokens,
        }
    }
}
