use layout::{
    GlyphPlacer, GlyphRasterizer, LayoutError, NormalizedAnnotation, SceneComposer,
    composer::Scene,
};
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use rand_xoshiro::SplitMix64;

use crate::render::{self, RenderCfg};

pub struct DatasetItemGenerator<G> {
    pub config: RenderCfg,
    composer: SceneComposer<G>,
}

impl<G: GlyphRasterizer> DatasetItemGenerator<G> {
    pub fn new(config: RenderCfg, rasterizer: G) -> Result<Self, LayoutError> {
        let placer = GlyphPlacer::new(rasterizer, config.font_size_range)?;
        let composer = SceneComposer::new(placer, config.margin);
        Ok(Self { config, composer })
    }

    /// Seed of item `id`, derived from the run seed so any item can be
    /// regenerated on its own.
    pub fn item_seed(&self, id: u32) -> u64 {
        SplitMix64::seed_from_u64(self.config.seed.wrapping_add(id as u64)).next_u64()
    }

    pub fn generate_with_seed(&self, seed: u64) -> Result<Scene, LayoutError> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let background = render::polygon_background(&self.config, &mut rng);

        let (lo, hi) = self.config.glyphs_per_image;
        let num_glyphs = rng.random_range(lo..=hi) as usize;

        self.composer.compose(background, num_glyphs, &mut rng)
    }

    pub fn annotations(&self, scene: &Scene) -> Vec<NormalizedAnnotation> {
        scene
            .placements
            .iter()
            .map(|p| p.normalize(self.config.width, self.config.height))
            .collect()
    }
}
