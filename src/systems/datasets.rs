use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;
use tracing::{info, warn};

use crate::components::{primitive::ProjectionResult, style::Style};

use super::projector::Projector;

/// A GeoJSON file to drape over the globe and the material options its
/// primitives get.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub path: PathBuf,
    pub style: Style,
}

impl Dataset {
    pub fn new(path: impl Into<PathBuf>, style: Style) -> Self {
        Self {
            path: path.into(),
            style,
        }
    }
}

#[derive(Debug)]
pub struct GlobeLayer {
    pub path: PathBuf,
    pub result: ProjectionResult,
}

pub struct DatasetSystem {}

impl DatasetSystem {
    pub fn load_layer(
        projector: &mut Projector,
        dataset: &Dataset,
        radius: f64,
    ) -> anyhow::Result<ProjectionResult> {
        let json = DatasetSystem::read_json(&dataset.path)?;
        let result = projector
            .project(&json, radius, Some(&dataset.style), Some(&dataset.style))
            .with_context(|| format!("projecting {}", dataset.path.display()))?;
        Ok(result)
    }

    /// Loads every dataset it can. A dataset that fails to read, parse or
    /// project is logged and skipped, the rest still load.
    pub fn load_layers(
        projector: &mut Projector,
        datasets: &[Dataset],
        radius: f64,
    ) -> Vec<GlobeLayer> {
        let mut layers = Vec::with_capacity(datasets.len());

        for dataset in datasets {
            match DatasetSystem::load_layer(projector, dataset, radius) {
                Ok(result) => {
                    info!(
                        path = %dataset.path.display(),
                        primitives = result.len(),
                        "loaded globe layer"
                    );
                    layers.push(GlobeLayer {
                        path: dataset.path.clone(),
                        result,
                    });
                }
                Err(err) => {
                    warn!(path = %dataset.path.display(), "skipping globe layer: {err:#}");
                }
            }
        }

        layers
    }

    fn read_json(path: &Path) -> anyhow::Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let json = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectorConfig;
    use serde_json::json;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hypersphere-geo-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn bad_datasets_are_skipped() {
        let land = write_temp(
            "land.json",
            r#"{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[3,3]]}}"#,
        );
        let broken = write_temp("broken.json", "{ nope");
        let foobar = write_temp("foobar.json", r#"{"type":"FooBar"}"#);
        let countries = write_temp(
            "countries.json",
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","geometry":{"type":"Point","coordinates":[1,1]}}]}"#,
        );
        let missing = land.with_file_name("missing.json");

        let style = json!({ "color": 0xf54a00, "transparent": true, "opacity": 0.7 })
            .as_object()
            .cloned()
            .unwrap();
        let datasets: Vec<Dataset> = [&land, &broken, &missing, &foobar, &countries]
            .into_iter()
            .map(|p| Dataset::new(p.clone(), style.clone()))
            .collect();

        let mut projector = Projector::with_seed(ProjectorConfig::default(), 11);
        let layers = DatasetSystem::load_layers(&mut projector, &datasets, 2.0);

        let paths: Vec<&PathBuf> = layers.iter().map(|l| &l.path).collect();
        assert_eq!(paths, vec![&land, &countries]);
        assert_eq!(layers[0].result.lines().next().unwrap().style["opacity"], json!(0.7));
        assert_eq!(layers[1].result.points().count(), 1);
    }
}
