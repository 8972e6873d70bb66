//! Integration tests for the upload node against a mocked pixx.io API.

#![cfg(feature = "node-upload")]

mod helpers;

use helpers::*;
use mockito::Matcher;
use ndarray::{ArrayD, IxDyn};
use pixxio_nodes::{
    AutoUploadImageToPixxioCollection, ImageTensor, ImagePipelineNode, NodeError, NodeRegistry,
};

fn upload_node() -> AutoUploadImageToPixxioCollection {
    AutoUploadImageToPixxioCollection::new(test_config())
}

#[tokio::test]
async fn test_upload_returns_input_unchanged() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/files")
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="fileName"\r\n\r\ncomfyui_upload\.jpg\r\n"#.to_string()),
            Matcher::Regex(r#"name="description"\r\n\r\nUploaded via ComfyUI\r\n"#.to_string()),
            Matcher::Regex(
                r#"name="keywords"\r\n\r\n\["comfyui","pixxio","upload"\]\r\n"#.to_string(),
            ),
            Matcher::Regex(r#"name="collectionIDs"\r\n\r\n\[42\]\r\n"#.to_string()),
            Matcher::Regex(
                r#"(?i)name="file"; filename="comfyui_upload\.jpg"\r\ncontent-type: image/jpeg"#
                    .to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(r#"{"success":true,"id":991}"#)
        .expect(1)
        .create_async()
        .await;

    let image = filled_tensor(&[1, 8, 6, 3], 0.25);
    let output = upload_node()
        .execute(upload_inputs(&server.url(), image.clone()))
        .await
        .unwrap();

    assert_eq!(output.into_image(), Some(image));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_accepts_channel_first_bytes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/files")
        .with_status(201)
        .expect(1)
        .create_async()
        .await;

    let image = ImageTensor::Byte(ArrayD::from_elem(IxDyn(&[3, 5, 7]), 200u8));
    let output = upload_node()
        .execute(upload_inputs(&server.url(), image.clone()))
        .await
        .unwrap();

    assert_eq!(output.into_image(), Some(image));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_accepts_rgba_and_grayscale() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/files")
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    for shape in [[1, 5, 6, 4], [1, 5, 6, 1]] {
        upload_node()
            .execute(upload_inputs(&server.url(), filled_tensor(&shape, 0.8)))
            .await
            .unwrap();
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/files")
        .with_status(401)
        .with_body("Invalid API key")
        .create_async()
        .await;

    let err = upload_node()
        .execute(upload_inputs(&server.url(), filled_tensor(&[1, 5, 6, 3], 0.5)))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("Invalid API key"));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let inputs =
        upload_inputs(&server.url(), filled_tensor(&[1, 5, 6, 3], 0.5)).with("api_key", "");
    let err = upload_node().execute(inputs).await.unwrap_err();

    assert!(matches!(err, NodeError::Argument(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_mediaspace_url_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let inputs = upload_inputs(&server.url(), filled_tensor(&[1, 5, 6, 3], 0.5))
        .with("mediaspace_url", "");
    let err = upload_node().execute(inputs).await.unwrap_err();

    assert!(matches!(err, NodeError::Argument(_)));
    assert!(err
        .to_string()
        .contains("api_key and mediaspace_url are required"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_collection_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let inputs = upload_inputs(&server.url(), filled_tensor(&[1, 5, 6, 3], 0.5))
        .with("collection_id", 0i64);
    let err = upload_node().execute(inputs).await.unwrap_err();

    assert!(matches!(err, NodeError::Argument(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unsupported_shape_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for shape in [vec![1, 5, 6, 2], vec![2, 4, 4, 3], vec![16]] {
        let err = upload_node()
            .execute(upload_inputs(&server.url(), filled_tensor(&shape, 0.5)))
            .await
            .unwrap_err();
        assert!(
            matches!(err, NodeError::Conversion(_)),
            "shape {:?} should be rejected",
            shape
        );
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_upload_through_registry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/files")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let registry = NodeRegistry::with_builtin_nodes(test_config()).await;
    let image = filled_tensor(&[1, 5, 6, 3], 1.0);
    let output = registry
        .execute(
            "AutoUploadImageToPixxioCollection",
            upload_inputs(&server.url(), image.clone()),
        )
        .await
        .unwrap();

    assert_eq!(output.into_image(), Some(image));
    mock.assert_async().await;
}
