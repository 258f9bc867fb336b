use image::RgbaImage;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    assets::{
        background::{Background, BackgroundDir, BackgroundSource, SolidBackground},
        card::{Card, CardDeck},
        classes::ClassMap,
    },
    dataset::{config::DatasetConfig, split::Split, writer::DatasetLayout},
    foundation::{
        error::{CardsceneError, CardsceneResult},
        math::scene_seed,
    },
    labels::projector::{LabelLine, LabelProjector},
    scene::{
        compose::{Scene, SceneStats},
        config::SceneConfig,
    },
};

/// Pixels and labels for one finished scene.
#[derive(Clone, Debug)]
pub struct SceneOutput {
    /// Straight-alpha RGBA8, `output_size` square.
    pub image: RgbaImage,
    pub labels: Vec<LabelLine>,
    pub stats: SceneStats,
}

/// Compose + global transform + background merge + label projection for one scene.
///
/// All randomness comes from `rng`; seed it per scene for reproducible output.
pub fn render_scene<R: Rng + ?Sized>(
    cards: &[Card],
    background: &Background,
    classes: &ClassMap,
    config: &SceneConfig,
    rng: &mut R,
) -> CardsceneResult<SceneOutput> {
    let projector = LabelProjector::new(classes, config.bbox_padding_px)?;
    // Fail before any pixel work if a card could never be labelled.
    for card in cards {
        classes.id_for(card.value())?;
    }
    let rendered = Scene::compose(cards, config, rng)?
        .apply_global_transform(config, rng)?
        .merge_onto_background(background, config, rng)?;
    let labels = projector.project_scene(&rendered)?;
    Ok(SceneOutput {
        image: rendered.image,
        labels,
        stats: rendered.stats,
    })
}

/// Totals for a dataset run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DatasetStats {
    pub scenes: usize,
    pub labels: usize,
    pub train: usize,
    pub val: usize,
    pub test: usize,
    /// Placement counters summed over every scene.
    pub placement: SceneStats,
}

impl DatasetStats {
    fn record(&mut self, split: Split, labels: usize, stats: &SceneStats) {
        self.scenes += 1;
        self.labels += labels;
        match split {
            Split::Train => self.train += 1,
            Split::Val => self.val += 1,
            Split::Test => self.test += 1,
        }
        self.placement.merge(stats);
    }
}

/// Everything a run reads from disk, loaded once and shared by all workers.
pub struct DatasetSources {
    pub deck: CardDeck,
    pub classes: ClassMap,
    pub backgrounds: Box<dyn BackgroundSource>,
}

impl std::fmt::Debug for DatasetSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetSources")
            .field("cards", &self.deck.len())
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

impl DatasetSources {
    #[tracing::instrument(skip(config))]
    pub fn load(config: &DatasetConfig) -> CardsceneResult<Self> {
        let deck = CardDeck::load_dir(&config.cards_dir)?;
        if deck.len() < config.cards_per_scene {
            return Err(CardsceneError::validation(format!(
                "cards_per_scene = {} but only {} cards were loaded",
                config.cards_per_scene,
                deck.len()
            )));
        }
        let classes = ClassMap::from_path(&config.class_mapping)?;
        let backgrounds: Box<dyn BackgroundSource> = match &config.backgrounds_dir {
            Some(dir) => Box::new(BackgroundDir::open(dir)?),
            None => Box::new(SolidBackground {
                rgba: config.background_rgba,
            }),
        };
        Ok(Self {
            deck,
            classes,
            backgrounds,
        })
    }

    /// Scene `index` of the run, fully determined by `config.seed` and `index`.
    pub fn render_index(
        &self,
        config: &DatasetConfig,
        index: usize,
    ) -> CardsceneResult<(Split, SceneOutput)> {
        let mut rng = StdRng::seed_from_u64(scene_seed(config.seed, index as u64));
        let split = config.split.assign(&mut rng);
        let cards = self.deck.sample(&mut rng, config.cards_per_scene)?;
        let background = self.backgrounds.sample(&mut rng)?;
        let out = render_scene(&cards, &background, &self.classes, &config.scene, &mut rng)?;
        Ok((split, out))
    }
}

/// Load inputs, render `config.scenes` scenes in parallel and write them under
/// `config.output_dir`.
pub fn render_dataset(config: &DatasetConfig) -> CardsceneResult<DatasetStats> {
    config.validate()?;
    let sources = DatasetSources::load(config)?;
    render_dataset_with(config, &sources)
}

/// [`render_dataset`] with inputs already in memory.
#[tracing::instrument(skip(config, sources), fields(scenes = config.scenes))]
pub fn render_dataset_with(
    config: &DatasetConfig,
    sources: &DatasetSources,
) -> CardsceneResult<DatasetStats> {
    let layout = DatasetLayout::new(&config.output_dir);
    layout.create_dirs()?;
    let pool = build_thread_pool(config.threads)?;

    let results = pool.install(|| {
        (0..config.scenes)
            .into_par_iter()
            .map(|index| -> CardsceneResult<(Split, usize, SceneStats)> {
                let (split, out) = sources.render_index(config, index)?;
                layout.write_scene(split, index, &out.image, &out.labels)?;
                Ok((split, out.labels.len(), out.stats))
            })
            .collect::<Vec<_>>()
    });

    let mut stats = DatasetStats::default();
    for item in results {
        let (split, labels, scene) = item?;
        stats.record(split, labels, &scene);
    }

    tracing::info!(
        scenes = stats.scenes,
        labels = stats.labels,
        cards_placed = stats.placement.cards_placed,
        cards_dropped = stats.placement.cards_dropped,
        out = %layout.root().display(),
        "dataset written"
    );
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> CardsceneResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardsceneError::validation(
            "dataset 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        CardsceneError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
