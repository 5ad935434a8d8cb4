//! Post-processing configuration: how one compiled APK is split into several artifacts.
//!
//! A [`PostProcessingConfiguration`] declares labeled groups (ABIs, screen densities,
//! locales, SDK versions, device features, GL textures) and a list of
//! [`ConfiguredArtifact`]s that pick one label per group. Resolving the labels with
//! [`PostProcessingConfiguration::to_output_artifacts`] gives concrete [`OutputArtifact`]s
//! with their file names filled in.
//!
//! # Examples
//!
//! ```rust
//! use restable::configuration::{Abi, ConfiguredArtifact, PostProcessingConfiguration};
//! use restable::diagnostics::Diagnostics;
//!
//! let mut config = PostProcessingConfiguration::default();
//! config.artifact_format = Some("${basename}.${abi}.${ext}".to_string());
//! config.abi_groups.insert("arm".to_string(), vec![Abi::ArmeabiV7a, Abi::Arm64V8a]);
//! config.artifacts.push(ConfiguredArtifact {
//!     abi_group: Some("arm".to_string()),
//!     ..ConfiguredArtifact::default()
//! });
//!
//! let artifacts = config.to_output_artifacts("app.apk", &Diagnostics::new())?;
//! assert_eq!(artifacts[0].name, "app.arm.apk");
//! assert_eq!(artifacts[0].abis, [Abi::ArmeabiV7a, Abi::Arm64V8a]);
//! # Ok::<(), restable::Error>(())
//! ```

mod artifacts;

use std::collections::BTreeMap;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::config::ConfigDescription;

/// A native code architecture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum Abi {
    #[strum(serialize = "armeabi")]
    Armeabi,
    #[strum(serialize = "armeabi-v7a")]
    ArmeabiV7a,
    #[strum(serialize = "arm64-v8a")]
    Arm64V8a,
    #[strum(serialize = "x86")]
    X86,
    #[strum(serialize = "x86_64")]
    X86_64,
    #[strum(serialize = "mips")]
    Mips,
    #[strum(serialize = "mips64")]
    Mips64,
    #[strum(serialize = "universal")]
    Universal,
}

/// SDK version bounds of an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AndroidSdk {
    /// Label the versions are declared under
    pub label: String,
    /// Lowest API level the artifact runs on
    pub min_sdk_version: i32,
    /// API level the artifact targets
    pub target_sdk_version: Option<i32>,
    /// Highest API level the artifact runs on
    pub max_sdk_version: Option<i32>,
}

impl AndroidSdk {
    /// Bounds that only set the minimum version.
    pub fn for_min_sdk(min_sdk: i32) -> Self {
        AndroidSdk {
            min_sdk_version: min_sdk,
            ..AndroidSdk::default()
        }
    }
}

/// A GL texture format and the asset paths that use it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlTexture {
    /// Texture format name
    pub name: String,
    /// Asset paths holding textures of this format
    pub texture_paths: Vec<String>,
}

/// Name of a device feature an artifact requires.
pub type DeviceFeature = String;

/// Labeled lists of values.
pub type Group<T> = BTreeMap<String, Vec<T>>;

/// Labeled single values.
pub type Entry<T> = BTreeMap<String, T>;

/// Returns the list for `label`, inserting an empty one if needed.
pub fn get_or_create_group<'a, T>(label: &str, group: &'a mut Group<T>) -> &'a mut Vec<T> {
    group.entry(label.to_string()).or_default()
}

/// A fully resolved artifact.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputArtifact {
    /// File name of the artifact
    pub name: String,
    /// Version code offset, starting at 1 in declaration order
    pub version: i32,
    /// ABIs included in the artifact
    pub abis: Vec<Abi>,
    /// Screen densities included in the artifact
    pub screen_densities: Vec<ConfigDescription>,
    /// Locales included in the artifact
    pub locales: Vec<ConfigDescription>,
    /// SDK bounds of the artifact
    pub android_sdk: Option<AndroidSdk>,
    /// Required device features
    pub features: Vec<DeviceFeature>,
    /// GL textures included in the artifact
    pub textures: Vec<GlTexture>,
}

/// An artifact as declared: a name or name format plus one group label per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfiguredArtifact {
    /// Explicit file name, which may use `${basename}` and `${ext}`
    pub name: Option<String>,
    /// Label into [`PostProcessingConfiguration::abi_groups`]
    pub abi_group: Option<String>,
    /// Label into [`PostProcessingConfiguration::screen_density_groups`]
    pub screen_density_group: Option<String>,
    /// Label into [`PostProcessingConfiguration::locale_groups`]
    pub locale_group: Option<String>,
    /// Label into [`PostProcessingConfiguration::android_sdks`]
    pub android_sdk: Option<String>,
    /// Label into [`PostProcessingConfiguration::device_feature_groups`]
    pub device_feature_group: Option<String>,
    /// Label into [`PostProcessingConfiguration::gl_texture_groups`]
    pub gl_texture_group: Option<String>,
}

/// Every group and artifact declared for post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostProcessingConfiguration {
    /// Artifacts in declaration order
    pub artifacts: Vec<ConfiguredArtifact>,
    /// Name format for artifacts without an explicit name
    pub artifact_format: Option<String>,
    /// ABI groups
    pub abi_groups: Group<Abi>,
    /// Screen density groups
    pub screen_density_groups: Group<ConfigDescription>,
    /// Locale groups
    pub locale_groups: Group<ConfigDescription>,
    /// SDK bounds by label
    pub android_sdks: Entry<AndroidSdk>,
    /// Device feature groups
    pub device_feature_groups: Group<DeviceFeature>,
    /// GL texture groups
    pub gl_texture_groups: Group<GlTexture>,
}
