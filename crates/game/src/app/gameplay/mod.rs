mod config;
mod movement;
mod scene_impl;

pub(crate) use config::WorldConfig;
pub(crate) use scene_impl::PlatformerScene;
