//! Stage systems: PageCollected → StageManager → SpeedTierReached / AllPagesCollected

use bevy::prelude::*;

use crate::logger;

use super::events::{AllPagesCollected, PageCollected, SpeedTierReached};
use super::manager::StageManager;

/// Volume для одного mood profile (rendering collaborator читает weight)
#[derive(Component, Debug, Clone)]
pub struct MoodVolume {
    pub index: usize,
    pub profile: String,
    pub weight: f32,
}

/// Startup: по одному MoodVolume на профиль
pub fn spawn_mood_volumes(mut commands: Commands, manager: Res<StageManager>) {
    for (index, (profile, weight)) in manager
        .profiles()
        .iter()
        .zip(manager.weights())
        .enumerate()
    {
        commands.spawn((
            MoodVolume {
                index,
                profile: profile.name.clone(),
                weight: *weight,
            },
            Name::new(format!("StagedVolume_{}", profile.name)),
        ));
    }
}

/// Обработка подобранных страниц
pub fn collect_pages(
    mut pages: EventReader<PageCollected>,
    mut manager: ResMut<StageManager>,
    mut tiers: EventWriter<SpeedTierReached>,
    mut finished: EventWriter<AllPagesCollected>,
) {
    for page in pages.read() {
        let change = manager.collect_page();
        logger::log(&format!(
            "Collected Pages: {} (page {:?})",
            change.collected, page.page
        ));

        if let Some(tier) = change.tier {
            tiers.write(SpeedTierReached { tier });
        }

        if change.completed {
            finished.write(AllPagesCollected {
                collected: change.collected,
            });
            logger::log_info("You made it. Perseverance wins.");
        }
    }
}

pub fn tick_stage_blend(mut manager: ResMut<StageManager>, time: Res<Time>) {
    if manager.is_blending() {
        manager.tick_blend(time.delta_secs());
    }
}

/// StageManager weights → MoodVolume components
pub fn sync_mood_volumes(manager: Res<StageManager>, mut volumes: Query<&mut MoodVolume>) {
    if !manager.is_changed() {
        return;
    }

    for mut volume in volumes.iter_mut() {
        if let Some(weight) = manager.weights().get(volume.index) {
            volume.weight = *weight;
        }
    }
}
