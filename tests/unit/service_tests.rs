// Image service selection and processing tests

use imgproxy_uri::config::ImgProxyOptions;
use imgproxy_uri::directive::{ProcessingConfiguration, SizeValue};
use imgproxy_uri::service::{
    select_service, ImageDimension, ImageService, ImageServiceResult, ImgProxyImageService,
    ProcessingTask, SourceFile, Storage,
};
use imgproxy_uri::ServiceError;

/// Stand-in for the host's default local processor
struct LocalProcessor;

impl ImageService for LocalProcessor {
    fn identifier(&self) -> &'static str {
        "local"
    }

    fn has_configuration(&self) -> bool {
        true
    }

    fn supported_mime_types(&self) -> Vec<&'static str> {
        vec!["image/jpeg", "image/png"]
    }

    fn can_process_task(&self, task: &ProcessingTask) -> bool {
        self.supported_mime_types()
            .contains(&task.source_file.mime_type.as_str())
    }

    fn process_task(&self, task: &ProcessingTask) -> Result<ImageServiceResult, ServiceError> {
        Ok(ImageServiceResult {
            url: task.source_file.identifier.clone(),
            dimension: ImageDimension::new(task.source_file.width, task.source_file.height),
            hash: None,
        })
    }
}

fn imgproxy() -> ImgProxyImageService {
    ImgProxyImageService::from_options(ImgProxyOptions {
        api_endpoint: Some("https://imgproxy.example".to_string()),
        source_uri: Some("https://www.example.com".to_string()),
        ..Default::default()
    })
}

fn services() -> Vec<Box<dyn ImageService>> {
    vec![Box::new(imgproxy()), Box::new(LocalProcessor)]
}

fn file(storage: Storage) -> SourceFile {
    SourceFile::new("/user_upload/photo.png", "image/png")
        .with_public_url("/fileadmin/user_upload/photo.png")
        .with_dimensions(1000, 500)
        .with_storage(storage)
}

#[test]
fn test_public_file_goes_to_imgproxy() {
    let services = services();
    let task = ProcessingTask::new(
        "Preview",
        file(Storage::public()),
        ProcessingConfiguration::default(),
    );

    let service = select_service(&services, &task).unwrap();
    assert_eq!(service.identifier(), "imgproxy");
}

#[test]
fn test_private_file_falls_back() {
    let services = services();
    let task = ProcessingTask::new(
        "Preview",
        file(Storage::private()),
        ProcessingConfiguration::default(),
    );

    let service = select_service(&services, &task).unwrap();
    assert_eq!(service.identifier(), "local");
}

#[test]
fn test_no_service_for_unsupported_mime() {
    let services = services();
    let source = SourceFile::new("/docs/a.pdf", "application/pdf").with_storage(Storage::public());
    let task = ProcessingTask::new("Preview", source, ProcessingConfiguration::default());

    assert!(select_service(&services, &task).is_none());
}

#[test]
fn test_relative_public_url_joined_onto_source_uri() {
    let config = ProcessingConfiguration {
        width: Some(SizeValue::cover(200)),
        height: Some(SizeValue::cover(200)),
        ..Default::default()
    };
    let task = ProcessingTask::new("CropScaleMask", file(Storage::public()), config);
    let result = imgproxy().process_task(&task).unwrap();

    // base64url("https://www.example.com/fileadmin/user_upload/photo.png")
    assert_eq!(
        result.url,
        "https://imgproxy.example/insecure/rt:fill/s:200:200/\
         aHR0cHM6Ly93d3cuZXhhbXBsZS5jb20vZmlsZWFkbWluL3VzZXJfdXBsb2FkL3Bob3RvLnBuZw"
    );
    assert_eq!(result.dimension, ImageDimension::new(200, 200));
    assert!(result.hash.is_none());
}

#[test]
fn test_result_serializes_without_hash() {
    let result = ImageServiceResult {
        url: "https://imgproxy.example/insecure/a".to_string(),
        dimension: ImageDimension::new(10, 20),
        hash: None,
    };
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "url": "https://imgproxy.example/insecure/a",
            "dimension": {"width": 10, "height": 20}
        })
    );
}
