//! Resolution of configured artifacts into named, versioned output artifacts.
//!
//! A [`ConfiguredArtifact`] refers to groups by label. Resolving it copies the labelled groups
//! out of the [`PostProcessingConfiguration`] and expands the matching `${...}` placeholders
//! of its name.

use crate::{
    configuration::{ConfiguredArtifact, Group, OutputArtifact, PostProcessingConfiguration},
    diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
    resource::Source,
    Error, Result,
};

/// Replaces the single occurrence of `placeholder` in `name` with `value`.
///
/// A value without a placeholder, a placeholder without a value and a placeholder that
/// occurs more than once are all rejected.
fn replace_placeholder(
    placeholder: &str,
    value: Option<&str>,
    name: &mut String,
) -> std::result::Result<(), String> {
    let Some(offset) = name.find(placeholder) else {
        return match value {
            Some(_) => Err(format!("missing placeholder for artifact: {placeholder}")),
            None => Ok(()),
        };
    };
    let Some(value) = value else {
        return Err(format!(
            "placeholder present but no value for artifact: {placeholder}"
        ));
    };

    name.replace_range(offset..offset + placeholder.len(), value);
    if name.contains(placeholder) {
        return Err(format!("placeholder present multiple times: {placeholder}"));
    }
    Ok(())
}

/// Fills in `${basename}` and `${ext}` from the APK file name. Both are optional.
fn to_base_name(format: &str, apk_name: &str) -> std::result::Result<String, String> {
    let (base_name, ext) = match apk_name.rfind('.') {
        Some(dot) => (&apk_name[..dot], Some(&apk_name[dot + 1..])),
        None => (apk_name, None),
    };

    let mut result = format.to_string();
    if result.contains("${basename}") {
        let base_name = Some(base_name).filter(|b| !b.is_empty());
        replace_placeholder("${basename}", base_name, &mut result)?;
    }
    if result.contains(".${ext}") {
        replace_placeholder("${ext}", ext, &mut result)?;
    }
    Ok(result)
}

fn copy_group<T: Clone>(
    label: Option<&String>,
    groups: &Group<T>,
    kind: &str,
    errors: &mut Vec<String>,
) -> Vec<T> {
    let Some(label) = label else {
        return Vec::new();
    };
    match groups.get(label) {
        Some(values) => values.clone(),
        None => {
            errors.push(format!("could not lookup required {kind}: {label}"));
            Vec::new()
        }
    }
}

impl ConfiguredArtifact {
    /// File name from the explicit name, or `None` when the artifact has none.
    fn explicit_name(&self, apk_name: &str) -> Option<std::result::Result<String, String>> {
        self.name
            .as_deref()
            .map(|name| to_base_name(name, apk_name))
    }

    /// File name from `format`, with every group placeholder replaced by its label.
    fn format_name(&self, format: &str, apk_name: &str) -> std::result::Result<String, String> {
        let mut result = to_base_name(format, apk_name)?;
        for (placeholder, label) in [
            ("${abi}", &self.abi_group),
            ("${density}", &self.screen_density_group),
            ("${locale}", &self.locale_group),
            ("${sdk}", &self.android_sdk),
            ("${feature}", &self.device_feature_group),
            ("${gl}", &self.gl_texture_group),
        ] {
            replace_placeholder(placeholder, label.as_deref(), &mut result)?;
        }
        Ok(result)
    }
}

impl PostProcessingConfiguration {
    /// Resolves every configured artifact against the declared groups.
    ///
    /// Artifacts are numbered from 1 in declaration order. An artifact is named by its own
    /// `name` when it has one and by [`PostProcessingConfiguration::artifact_format`]
    /// otherwise. `apk_name` supplies `${basename}` and `${ext}`.
    ///
    /// Every problem is reported to `diagnostics`, so a single call lists all broken
    /// artifacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Artifact`] if any artifact has no name, a name whose placeholders do
    /// not match its labels, or a label that names no declared group.
    pub fn to_output_artifacts(
        &self,
        apk_name: &str,
        diagnostics: &Diagnostics,
    ) -> Result<Vec<OutputArtifact>> {
        let mut output = Vec::with_capacity(self.artifacts.len());
        let mut failed = 0usize;

        for (index, artifact) in self.artifacts.iter().enumerate() {
            let version = i32::try_from(index + 1)
                .map_err(|_| Error::Artifact("too many artifacts".to_string()))?;

            match self.resolve(artifact, version, apk_name) {
                Ok(resolved) => output.push(resolved),
                Err((name, errors)) => {
                    failed += 1;
                    for message in errors {
                        let mut diagnostic = Diagnostic::new(
                            DiagnosticSeverity::Error,
                            DiagnosticCategory::Artifact,
                            message,
                        );
                        if let Some(name) = &name {
                            diagnostic = diagnostic.with_source(Source::new(name.clone()));
                        }
                        diagnostics.push(diagnostic);
                    }
                }
            }
        }

        if failed > 0 {
            return Err(Error::Artifact(format!(
                "{failed} of {} artifacts could not be resolved",
                self.artifacts.len()
            )));
        }
        Ok(output)
    }

    #[allow(clippy::type_complexity)]
    fn resolve(
        &self,
        artifact: &ConfiguredArtifact,
        version: i32,
        apk_name: &str,
    ) -> std::result::Result<OutputArtifact, (Option<String>, Vec<String>)> {
        let name = match (artifact.explicit_name(apk_name), &self.artifact_format) {
            (Some(name), _) => name,
            (None, Some(format)) => artifact.format_name(format, apk_name),
            (None, None) => Err("no artifact name or artifact format".to_string()),
        };
        let name = name.map_err(|message| {
            (
                None,
                vec![format!("could not determine split APK artifact name: {message}")],
            )
        })?;

        let mut errors = Vec::new();
        let mut resolved = OutputArtifact {
            version,
            abis: copy_group(artifact.abi_group.as_ref(), &self.abi_groups, "ABIs", &mut errors),
            screen_densities: copy_group(
                artifact.screen_density_group.as_ref(),
                &self.screen_density_groups,
                "screen densities",
                &mut errors,
            ),
            locales: copy_group(
                artifact.locale_group.as_ref(),
                &self.locale_groups,
                "locales",
                &mut errors,
            ),
            features: copy_group(
                artifact.device_feature_group.as_ref(),
                &self.device_feature_groups,
                "device features",
                &mut errors,
            ),
            textures: copy_group(
                artifact.gl_texture_group.as_ref(),
                &self.gl_texture_groups,
                "OpenGL texture formats",
                &mut errors,
            ),
            ..OutputArtifact::default()
        };

        if let Some(label) = &artifact.android_sdk {
            match self.android_sdks.get(label) {
                Some(sdk) => resolved.android_sdk = Some(sdk.clone()),
                None => errors.push(format!("could not lookup required Android SDK version: {label}")),
            }
        }

        if !errors.is_empty() {
            return Err((Some(name), errors));
        }
        resolved.name = name;
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ConfigDescription,
        configuration::{Abi, AndroidSdk, GlTexture},
    };

    fn label(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn configuration() -> PostProcessingConfiguration {
        let mut config = PostProcessingConfiguration::default();
        config.abi_groups.insert("arm".into(), vec![Abi::ArmeabiV7a, Abi::Arm64V8a]);
        config.abi_groups.insert("other".into(), vec![Abi::X86, Abi::Mips]);
        config.screen_density_groups.insert(
            "large".into(),
            vec![ConfigDescription::parse("xhdpi").unwrap()],
        );
        config
            .locale_groups
            .insert("europe".into(), vec![ConfigDescription::parse("en").unwrap()]);
        config
            .android_sdks
            .insert("v19".into(), AndroidSdk::for_min_sdk(19));
        config
            .device_feature_groups
            .insert("low-latency".into(), vec!["android.hardware.audio.low_latency".into()]);
        config.gl_texture_groups.insert(
            "dxt1".into(),
            vec![GlTexture {
                name: "GL_EXT_texture_compression_dxt1".into(),
                texture_paths: vec!["assets/dxt1/*".into()],
            }],
        );
        config
    }

    #[test]
    fn test_replace_placeholder() {
        let mut name = "app.${abi}.apk".to_string();
        replace_placeholder("${abi}", Some("arm"), &mut name).unwrap();
        assert_eq!(name, "app.arm.apk");

        let mut name = "app.apk".to_string();
        replace_placeholder("${abi}", None, &mut name).unwrap();
        assert!(replace_placeholder("${abi}", Some("arm"), &mut name).is_err());

        let mut name = "app.${abi}.apk".to_string();
        assert!(replace_placeholder("${abi}", None, &mut name).is_err());

        let mut name = "${abi}.${abi}.apk".to_string();
        assert!(replace_placeholder("${abi}", Some("arm"), &mut name).is_err());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(to_base_name("${basename}.${ext}", "app.apk").unwrap(), "app.apk");
        assert_eq!(
            to_base_name("${basename}.x86.${ext}", "my.app.apk").unwrap(),
            "my.app.x86.apk"
        );
        assert_eq!(to_base_name("fixed.apk", "app.apk").unwrap(), "fixed.apk");
        assert!(to_base_name("${basename}.${ext}", ".apk").is_err());
        assert!(to_base_name("${basename}.${ext}", "app").is_err());
    }

    #[test]
    fn test_format_with_every_group() {
        let mut config = configuration();
        config.artifact_format =
            label("${basename}.${abi}.${density}-${locale}.${sdk}.${feature}.${gl}.${ext}");
        config.artifacts.push(ConfiguredArtifact {
            abi_group: label("arm"),
            screen_density_group: label("large"),
            locale_group: label("europe"),
            android_sdk: label("v19"),
            device_feature_group: label("low-latency"),
            gl_texture_group: label("dxt1"),
            ..ConfiguredArtifact::default()
        });

        let diag = Diagnostics::new();
        let artifacts = config.to_output_artifacts("app.apk", &diag).unwrap();
        assert_eq!(artifacts.len(), 1);

        let artifact = &artifacts[0];
        assert_eq!(artifact.name, "app.arm.large-europe.v19.low-latency.dxt1.apk");
        assert_eq!(artifact.version, 1);
        assert_eq!(artifact.abis, [Abi::ArmeabiV7a, Abi::Arm64V8a]);
        assert_eq!(artifact.screen_densities[0].density, ConfigDescription::DENSITY_XHIGH);
        assert_eq!(artifact.locales[0].language_str(), "en");
        assert_eq!(artifact.android_sdk.as_ref().unwrap().min_sdk_version, 19);
        assert_eq!(artifact.features, ["android.hardware.audio.low_latency"]);
        assert_eq!(artifact.textures[0].texture_paths, ["assets/dxt1/*"]);
        assert!(!diag.has_any());
    }

    #[test]
    fn test_versions_follow_declaration_order() {
        let mut config = configuration();
        config.artifact_format = label("${abi}.apk");
        for group in ["other", "arm"] {
            config.artifacts.push(ConfiguredArtifact {
                abi_group: label(group),
                ..ConfiguredArtifact::default()
            });
        }

        let artifacts = config
            .to_output_artifacts("app.apk", &Diagnostics::new())
            .unwrap();
        let names: Vec<(&str, i32)> = artifacts
            .iter()
            .map(|a| (a.name.as_str(), a.version))
            .collect();
        assert_eq!(names, [("other.apk", 1), ("arm.apk", 2)]);
    }

    #[test]
    fn test_explicit_name_wins_over_format() {
        let mut config = configuration();
        config.artifact_format = label("${abi}.apk");
        config.artifacts.push(ConfiguredArtifact {
            name: label("${basename}.custom.${ext}"),
            abi_group: label("arm"),
            ..ConfiguredArtifact::default()
        });

        let artifacts = config
            .to_output_artifacts("app.apk", &Diagnostics::new())
            .unwrap();
        assert_eq!(artifacts[0].name, "app.custom.apk");
        assert_eq!(artifacts[0].abis.len(), 2);
    }

    #[test]
    fn test_failures_are_reported() {
        let cases = [
            (None, ConfiguredArtifact::default()),
            (
                label("${basename}.apk"),
                ConfiguredArtifact {
                    abi_group: label("arm"),
                    ..ConfiguredArtifact::default()
                },
            ),
            (label("${basename}.${abi}.apk"), ConfiguredArtifact::default()),
            (
                label("${abi}.${abi}.apk"),
                ConfiguredArtifact {
                    abi_group: label("arm"),
                    ..ConfiguredArtifact::default()
                },
            ),
            (
                label("${abi}.apk"),
                ConfiguredArtifact {
                    abi_group: label("missing"),
                    ..ConfiguredArtifact::default()
                },
            ),
            (
                label("${sdk}.apk"),
                ConfiguredArtifact {
                    android_sdk: label("v99"),
                    ..ConfiguredArtifact::default()
                },
            ),
        ];

        for (format, artifact) in cases {
            let mut config = configuration();
            config.artifact_format = format.clone();
            config.artifacts.push(artifact);

            let diag = Diagnostics::new();
            let result = config.to_output_artifacts("app.apk", &diag);
            assert!(matches!(result, Err(Error::Artifact(_))), "{format:?}");
            assert_eq!(diag.error_count(), 1, "{format:?}");
            assert!(!diag.by_category(DiagnosticCategory::Artifact).is_empty());
        }
    }

    #[test]
    fn test_unknown_label_names_the_artifact() {
        let mut config = configuration();
        config.artifact_format = label("${locale}.apk");
        config.artifacts.push(ConfiguredArtifact {
            locale_group: label("asia"),
            ..ConfiguredArtifact::default()
        });

        let diag = Diagnostics::new();
        assert!(config.to_output_artifacts("app.apk", &diag).is_err());
        let errors = diag.errors();
        assert_eq!(errors[0].source.as_ref().unwrap().path, "asia.apk");
        assert!(errors[0].message.contains("asia"));
    }
}
