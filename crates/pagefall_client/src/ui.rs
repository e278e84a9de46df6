use bevy::prelude::*;
use pagefall_simulation::InteractPrompt;

use crate::level::SceneMember;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_prompt)
            .add_systems(Update, sync_prompt);
    }
}

/// Текст подсказки "Press E to pick up"
#[derive(Component)]
pub struct InteractPromptText;

fn spawn_prompt(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            bottom: Val::Percent(35.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                InteractPromptText,
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.85)),
                Visibility::Hidden,
            ));
        });
}

/// InteractPrompt resource → Text + Visibility
fn sync_prompt(
    prompt: Res<InteractPrompt>,
    mut texts: Query<(&mut Text, &mut Visibility), With<InteractPromptText>>,
) {
    if !prompt.is_changed() {
        return;
    }

    for (mut text, mut visibility) in texts.iter_mut() {
        let target = if prompt.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != target {
            *visibility = target;
        }
        if text.0 != prompt.text {
            text.0 = prompt.text.clone();
        }
    }
}

/// Главное меню: 2D камера + заголовок + подсказка по клавишам
pub fn spawn_main_menu(commands: &mut Commands) {
    commands.spawn((Camera2d, SceneMember));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.02, 0.02, 0.03)),
            SceneMember,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAGEFALL"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.82, 0.75)),
            ));
            parent.spawn((
                Text::new("Press Enter to start, Esc to quit"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
        });
}
