use base64::{engine::general_purpose, Engine as _};
use plant_identifier_lib::models::plant::UploadedImage;
use plant_identifier_lib::services::{identify_all, ImagePayload, PlantSession, VisionModel};
use plant_identifier_lib::{parse_plant_info, AppError, ParsedPlantRecord};

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];

/// Model that answers with a fixed reply
struct CannedModel(&'static str);

impl VisionModel for CannedModel {
    async fn describe(&self, _image: &ImagePayload) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

/// Model that is always unreachable
struct OfflineModel;

impl VisionModel for OfflineModel {
    async fn describe(&self, _image: &ImagePayload) -> Result<String, AppError> {
        Err(AppError::Api {
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }
}

fn upload(name: &str) -> UploadedImage {
    UploadedImage {
        file_name: name.to_string(),
        data_base64: general_purpose::STANDARD.encode(JPEG_MAGIC),
    }
}

#[test]
fn test_text_without_labels_only_fills_description() {
    for text in ["", "\n\n", "random words", "🌿🌿🌿", "\u{0}\u{1}\u{2}"] {
        let record = parse_plant_info(text);
        assert_eq!(record.name, "");
        assert_eq!(record.scientific_name, "");
        assert_eq!(record.quality_score, 0);
        assert_eq!(record.rarity_score, 0);
        assert_eq!(record.care, Default::default());
    }
}

#[test]
fn test_documented_examples() {
    assert_eq!(parse_plant_info("Name: rose\n").name, "Rose");
    assert_eq!(parse_plant_info("Quality: 85%\n").quality_score, 85);
    assert_eq!(parse_plant_info("Quality: abc%\n").quality_score, 0);
    assert_eq!(parse_plant_info("Name: a\nName: b\n").name, "B");

    let record = parse_plant_info("hello world\nName: Fern\n");
    assert_eq!(record.description, "Hello world");
    assert_eq!(record.name, "Fern");

    assert_eq!(parse_plant_info(""), ParsedPlantRecord::default());
}

#[test]
fn test_markdown_reply_end_to_end() {
    let reply = "Here is what I found:\n\n\
        **Name:** snake plant\n\
        **Scientific name:** dracaena trifasciata\n\
        **Quality:** 90%\n\
        **Rarity:** 15%\n\
        **Watering:** Every 2-3 weeks\n\
        **Light:** Low to bright indirect\n\
        **Temperature:** 15-30°C\n\
        **Soil:** Cactus mix\n";

    let model = CannedModel(reply);
    let batch = tokio_test::block_on(identify_all(&model, &[upload("snake.jpg")]));

    assert!(batch.failures.is_empty());
    let plant = &batch.plants[0];
    assert_eq!(plant.record.name, "Snake plant");
    assert_eq!(plant.record.scientific_name, "Dracaena trifasciata");
    assert_eq!(plant.record.description, "Here is what I found:");
    assert_eq!(plant.record.quality_score, 90);
    assert_eq!(plant.record.rarity_score, 15);
    assert_eq!(plant.record.care.soil, "Cactus mix");
    assert!(plant.image_url.starts_with("data:image/jpeg;base64,"));
}

#[test]
fn test_offline_model_reports_every_image() {
    let batch = tokio_test::block_on(identify_all(&OfflineModel, &[upload("a.jpg"), upload("b.jpg")]));

    assert!(batch.plants.is_empty());
    assert_eq!(batch.failures.len(), 2);
    assert_eq!(
        batch.last_error(),
        Some("Error: Model API returned 503: Service Unavailable")
    );

    let mut session = PlantSession::new();
    session.begin_batch();
    session.finish_batch(batch);
    let view = session.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.error.as_deref(), Some("Error: Model API returned 503: Service Unavailable"));
}
