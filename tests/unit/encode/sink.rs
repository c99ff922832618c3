use std::collections::BTreeMap;

use super::*;
use crate::assets::registry::{AssetRegistry, LayerMap};
use crate::foundation::core::TraitCategory;
use crate::generate::batch::generate_batch;
use crate::generate::config::GenerationConfig;

fn batch(count: u32) -> GeneratedBatch {
    let traits: BTreeMap<TraitCategory, LayerMap> = TraitCategory::ALL
        .into_iter()
        .map(|c| {
            let mut layers = LayerMap::new();
            layers.insert(format!("{c}.png"), image::RgbaImage::new(2, 2));
            (c, layers)
        })
        .collect();
    let registry = AssetRegistry::from_layers(
        image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255])),
        image::RgbaImage::new(2, 2),
        traits,
        LayerMap::new(),
    )
    .unwrap();
    let cfg = GenerationConfig {
        count,
        seed: Some(1),
        ..GenerationConfig::default()
    };
    generate_batch(&registry, &cfg).unwrap()
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "nftforge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn write_batch_pushes_image_then_metadata_per_item() {
    let batch = batch(2);
    let mut sink = InMemorySink::new();
    write_batch(&batch, &CollectionInfo::default(), &mut sink).unwrap();

    assert_eq!(sink.announced_items(), Some(2));
    assert!(sink.is_finished());
    let names: Vec<&str> = sink.files().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        ["PRIMO_0000.png", "PRIMO_0000.json", "PRIMO_0001.png", "PRIMO_0001.json"]
    );
    assert_eq!(sink.files()[0].1, batch.items()[0].png);
    assert_eq!(
        sink.files()[1].1,
        batch.items()[0].metadata_json.as_bytes()
    );
}

#[test]
fn write_batch_uses_collection_file_prefix() {
    let batch = batch(1);
    let collection = CollectionInfo {
        file_prefix: "ROCK".to_string(),
        ..CollectionInfo::default()
    };
    let mut sink = InMemorySink::new();
    write_batch(&batch, &collection, &mut sink).unwrap();
    assert_eq!(sink.files()[0].0, "ROCK_0000.png");
}

#[test]
fn empty_batch_still_begins_and_ends() {
    let mut sink = InMemorySink::new();
    write_batch(&batch(0), &CollectionInfo::default(), &mut sink).unwrap();
    assert_eq!(sink.announced_items(), Some(0));
    assert!(sink.is_finished());
    assert!(sink.files().is_empty());
}

#[test]
fn previews_write_first_items_only() {
    let tmp = temp_dir("previews");
    let written = write_previews(&batch(4), &CollectionInfo::default(), &tmp, 2).unwrap();
    assert_eq!(written.len(), 2);
    assert!(tmp.join("PRIMO_0000.png").exists());
    assert!(tmp.join("PRIMO_0001.png").exists());
    assert!(!tmp.join("PRIMO_0002.png").exists());
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn previews_of_empty_batch_write_nothing() {
    let tmp = temp_dir("previews_empty");
    let written = write_previews(&batch(0), &CollectionInfo::default(), &tmp, 5).unwrap();
    assert!(written.is_empty());
    assert!(!tmp.exists());
}

#[test]
fn dir_sink_creates_directory() {
    let tmp = temp_dir("dir_sink").join("nested");
    let mut sink = DirSink::new(&tmp);
    write_batch(&batch(1), &CollectionInfo::default(), &mut sink).unwrap();
    assert_eq!(sink.written().len(), 2);
    assert!(tmp.join("PRIMO_0000.json").exists());
    std::fs::remove_dir_all(tmp.parent().unwrap()).ok();
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("out.zip")).unwrap();
}
