//! Integration tests for builder combinations.
//!
//! Each test assembles a realistic fixture from several builders and checks what ends up in
//! the finished table or configuration.

use restable::{
    configuration::{Abi, ConfiguredArtifact},
    diagnostics::{DiagnosticCategory, Diagnostics},
    prelude::*,
    table::{Overlayable, OverlayableItem, PolicyFlags},
    testing::{get_value_for_config, ArtifactBuilder, PostProcessingConfigurationBuilder},
    values::ReferenceType,
    xml::SCHEMA_ANDROID,
};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_app_name_string() {
    let table = ResourceTableBuilder::new()
        .add_string("app:string/app_name", "Hello")
        .build();

    assert_eq!(table.packages().len(), 1);
    let package = table.find_package("app").unwrap();
    assert_eq!(package.types().len(), 1);

    let strings = package.find_type(ResourceType::String).unwrap();
    assert_eq!(strings.entries().len(), 1);
    assert_eq!(strings.entries()[0].name, "app_name");

    let value = get_value::<StringValue>(&table, "app:string/app_name").unwrap();
    assert_eq!(&*value.value, "Hello");
}

#[test]
fn test_each_add_gives_one_entry_of_its_variant() {
    let table = ResourceTableBuilder::new()
        .add_simple("app:id/toolbar")
        .add_reference("app:drawable/alias", "app:drawable/icon")
        .add_string("app:string/title", "Title")
        .add_file_reference("app:drawable/icon", "res/drawable/icon.png", None)
        .build();

    let package = table.find_package("app").unwrap();
    let total: usize = package.types().iter().map(|t| t.entries().len()).sum();
    assert_eq!(total, 4);

    assert!(get_value::<Id>(&table, "app:id/toolbar").is_some());
    let alias = get_value::<Reference>(&table, "app:drawable/alias").unwrap();
    assert_eq!(alias.name, Some(parse_name_or_die("app:drawable/icon")));
    assert_eq!(alias.reference_type, ReferenceType::Resource);
    assert!(get_value::<StringValue>(&table, "app:string/title").is_some());
    assert!(get_value::<FileReference>(&table, "app:drawable/icon").is_some());
}

#[test]
fn test_two_configs_share_one_entry() {
    let land = parse_config_or_die("land");
    let table = ResourceTableBuilder::new()
        .add_string("app:string/label", "portrait")
        .add_string_with_config("app:string/label", ResourceId::default(), &land, "landscape")
        .build();

    let result = table
        .find_resource(&parse_name_or_die("app:string/label"))
        .unwrap();
    assert_eq!(result.entry.values().len(), 2);

    let default = get_value::<StringValue>(&table, "app:string/label").unwrap();
    let landscape = get_value_for_config::<StringValue>(&table, "app:string/label", &land).unwrap();
    assert_eq!(default.value.as_str(), "portrait");
    assert_eq!(landscape.value.as_str(), "landscape");
    // Both strings live in the table's pool.
    assert_eq!(table.string_pool.len(), 2);
}

#[test]
fn test_theme_fixture() {
    let table = ResourceTableBuilder::new()
        .add_value_with_id(
            "app:attr/layout_gravity",
            ResourceId(0x7f01_0000),
            AttributeBuilder::new()
                .set_type_mask(AttributeTypeMask::FLAGS)
                .add_item("top", 0x30)
                .add_item("bottom", 0x50)
                .add_item_with_comment("center", 0x11, "both axes")
                .build(),
        )
        .add_value(
            "app:style/Theme.App",
            StyleBuilder::new()
                .set_parent("android:style/Theme.Material")
                .add_item(
                    "app:attr/layout_gravity",
                    build_primitive(BinaryPrimitive::TYPE_INT_HEX, 0x50),
                )
                .add_item_with_id(
                    "android:attr/colorAccent",
                    ResourceId(0x0101_0435),
                    build_reference("app:color/accent", None),
                )
                .build(),
        )
        .add_value(
            "app:styleable/Widget",
            StyleableBuilder::new()
                .add_item("app:attr/layout_gravity", Some(ResourceId(0x7f01_0000)))
                .add_item("android:attr/text", None)
                .build(),
        )
        .build();

    let attr = get_value::<Attribute>(&table, "app:attr/layout_gravity").unwrap();
    let symbols: Vec<(&str, u32)> = attr
        .symbols
        .iter()
        .map(|s| (s.symbol.name.as_ref().unwrap().entry.as_str(), s.value))
        .collect();
    assert_eq!(symbols, [("top", 0x30), ("bottom", 0x50), ("center", 0x11)]);
    assert_eq!(attr.symbols[2].symbol.meta.comment, "both axes");

    let style = get_value::<Style>(&table, "app:style/Theme.App").unwrap();
    assert_eq!(
        style.parent.as_ref().unwrap().name,
        Some(parse_name_or_die("android:style/Theme.Material"))
    );
    assert_eq!(style.entries.len(), 2);
    assert_eq!(style.entries[0].key.name, Some(parse_name_or_die("app:attr/layout_gravity")));
    assert_eq!(style.entries[1].key.id, Some(ResourceId(0x0101_0435)));

    let styleable = get_value::<Styleable>(&table, "app:styleable/Widget").unwrap();
    assert_eq!(styleable.entries[0].id, Some(ResourceId(0x7f01_0000)));
    assert_eq!(styleable.entries[1].id, None);
}

#[test]
fn test_symbol_state_and_overlayable() {
    let overlayable = Arc::new(Overlayable::new("Theme", "overlay://theme"));
    let mut item = OverlayableItem::new(overlayable);
    item.policies = PolicyFlags::PUBLIC | PolicyFlags::SYSTEM_PARTITION;

    let table = ResourceTableBuilder::new()
        .add_simple("app:color/accent")
        .set_symbol_state(
            "app:color/accent",
            ResourceId(0x7f02_0000),
            VisibilityLevel::Public,
            true,
        )
        .set_overlayable("app:color/accent", item)
        .build();

    let entry = table
        .find_resource(&parse_name_or_die("app:color/accent"))
        .unwrap()
        .entry;
    assert_eq!(entry.id, Some(ResourceId(0x7f02_0000)));
    assert_eq!(entry.visibility.level, VisibilityLevel::Public);
    assert!(entry.allow_new.is_some());
    let overlayable_item = entry.overlayable_item.as_ref().unwrap();
    assert_eq!(overlayable_item.overlayable.name, "Theme");
    assert!(overlayable_item.policies.contains(PolicyFlags::PUBLIC));

    assert_eq!(
        table
            .find_resource_by_id(ResourceId(0x7f02_0000))
            .unwrap()
            .entry
            .name,
        "accent"
    );
}

#[test]
fn test_table_reports_duplicates_without_panicking() {
    init_logging();
    let mut table = ResourceTableBuilder::new()
        .add_string("app:string/title", "first")
        .build();
    let second = table.string_pool.make_ref("second");

    let diagnostics = Diagnostics::new();
    let result = table.add_resource(
        NewResourceBuilder::new(parse_name_or_die("app:string/title"))
            .set_value(StringValue::new(second), ConfigDescription::default())
            .build(),
        &diagnostics,
    );

    assert!(matches!(result, Err(Error::DuplicateValue { .. })));
    assert!(diagnostics.has_errors());
    assert_eq!(
        get_value::<StringValue>(&table, "app:string/title")
            .unwrap()
            .value
            .as_str(),
        "first"
    );
}

#[test]
#[should_panic(expected = "failed to add resource 'app:string/title'")]
fn test_builder_panics_on_duplicates() {
    let _ = ResourceTableBuilder::new()
        .add_string("app:string/title", "first")
        .add_string("app:string/title", "second");
}

#[test]
fn test_split_configuration() {
    let config = PostProcessingConfigurationBuilder::new()
        .add_abi_group("arm", vec![Abi::ArmeabiV7a, Abi::Arm64V8a])
        .add_density_group("large", &["xhdpi", "xxhdpi"])
        .add_locale_group("europe", &["en", "fr", "de"])
        .add_android_sdk("v28", 28)
        .set_artifact_format("${basename}.${abi}.${density}.${ext}")
        .add_artifact(ConfiguredArtifact {
            abi_group: Some("arm".to_string()),
            screen_density_group: Some("large".to_string()),
            ..ConfiguredArtifact::default()
        })
        .add_artifact(ConfiguredArtifact {
            name: Some("${basename}-intl.${ext}".to_string()),
            locale_group: Some("europe".to_string()),
            android_sdk: Some("v28".to_string()),
            ..ConfiguredArtifact::default()
        })
        .build();

    let diagnostics = Diagnostics::new();
    let artifacts = config.to_output_artifacts("app.apk", &diagnostics).unwrap();
    assert!(!diagnostics.has_any());

    let expected = ArtifactBuilder::new()
        .set_name("app.arm.large.apk")
        .set_version(1)
        .add_abi(Abi::ArmeabiV7a)
        .add_abi(Abi::Arm64V8a)
        .add_density(parse_config_or_die("xhdpi"))
        .add_density(parse_config_or_die("xxhdpi"))
        .build();
    assert_eq!(artifacts[0], expected);

    assert_eq!(artifacts[1].name, "app-intl.apk");
    assert_eq!(artifacts[1].version, 2);
    assert_eq!(artifacts[1].locales.len(), 3);
    assert_eq!(artifacts[1].android_sdk.as_ref().unwrap().min_sdk_version, 28);
}

#[test]
fn test_split_configuration_reports_unknown_groups() {
    init_logging();
    let config = PostProcessingConfigurationBuilder::new()
        .add_abi_group("arm", vec![Abi::Arm64V8a])
        .add_artifact(ConfiguredArtifact {
            name: Some("broken.apk".to_string()),
            abi_group: Some("x86".to_string()),
            locale_group: Some("asia".to_string()),
            ..ConfiguredArtifact::default()
        })
        .build();

    let diagnostics = Diagnostics::new();
    let err = config.to_output_artifacts("app.apk", &diagnostics).unwrap_err();
    assert!(matches!(err, Error::Artifact(_)));

    let reported = diagnostics.by_category(DiagnosticCategory::Artifact);
    assert_eq!(reported.len(), 2);
    assert!(reported[0].message.contains("x86"));
    assert!(reported[1].message.contains("asia"));
}

#[test]
fn test_xml_fixture() {
    let context = ContextBuilder::new().set_compilation_package("com.app").build();
    let doc = restable::testing::build_xml_dom_for_package_name(
        &context,
        r#"<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
                android:orientation="vertical">
             <TextView android:text="@string/title"/>
             <Button android:id="@+id/ok"/>
           </LinearLayout>"#,
    );

    assert_eq!(doc.file.name.package, "com.app");
    assert_eq!(
        doc.root
            .find_attribute(SCHEMA_ANDROID, "orientation")
            .unwrap()
            .value,
        "vertical"
    );
    let children: Vec<&str> = doc.root.child_elements().map(|e| e.name.as_str()).collect();
    assert_eq!(children, ["TextView", "Button"]);
    assert!(doc.root.find_child("", "Button").is_some());
}
