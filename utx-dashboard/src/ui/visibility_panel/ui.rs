use bevy::prelude::*;
use bevy::ui::RelativeCursorPosition;
use constants::panel::{
    BODY_BACKGROUND, BUTTON_IDLE, HEADER_BACKGROUND, MUTED_TEXT_COLOUR, PANEL_BACKGROUND,
    TEXT_COLOUR,
};

use super::state::*;
use crate::engine::layers::{LayerRegistry, LayerSection, RegisteredLayer, VisibilityToggle};

// Spawns the panel with its header and one empty list per section
pub fn spawn_visibility_panel(mut commands: Commands, state: Res<PanelUiState>) {
    commands
        .spawn((
            PanelRoot,
            Name::new("VisibilityPanel"),
            BackgroundColor(PANEL_BACKGROUND),
            RelativeCursorPosition::default(),
            Node {
                width: Val::Px(state.width()),
                min_width: Val::Px(0.0),
                max_height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Stretch,
                overflow: Overflow::clip(),
                ..default()
            },
        ))
        .with_children(|parent| {
            let (pad, btn) = if state.collapsed { (4.0, 24.0) } else { (10.0, 26.0) };

            parent
                .spawn((
                    HeaderNode,
                    Name::new("Header"),
                    BackgroundColor(HEADER_BACKGROUND),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::all(Val::Px(pad)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: if state.collapsed {
                            JustifyContent::FlexEnd
                        } else {
                            JustifyContent::SpaceBetween
                        },
                        ..default()
                    },
                ))
                .with_children(|header| {
                    header.spawn((
                        TitleText,
                        Name::new("Title"),
                        Text::new("Layers"),
                        TextFont { font_size: 16.0, ..default() },
                        TextColor(TEXT_COLOUR),
                        Node { display: state.body_display(), ..default() },
                    ));

                    header
                        .spawn((
                            CollapseButton,
                            Name::new("CollapseButton"),
                            Button,
                            BackgroundColor(BUTTON_IDLE),
                            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                            Node {
                                width: Val::Px(btn),
                                height: Val::Px(btn),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                        ))
                        .with_children(|btn_parent| {
                            btn_parent.spawn((
                                CollapseLabel,
                                Text::new(chevron(state.collapsed)),
                                TextFont { font_size: 16.0, ..default() },
                                TextColor(TEXT_COLOUR),
                            ));
                        });
                });

            parent
                .spawn((
                    PanelBody,
                    Name::new("Body"),
                    BackgroundColor(BODY_BACKGROUND),
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect::axes(Val::Px(10.0), Val::Px(8.0)),
                        row_gap: Val::Px(10.0),
                        display: state.body_display(),
                        flex_direction: FlexDirection::Column,
                        overflow: Overflow::clip_y(),
                        ..default()
                    },
                ))
                .with_children(|body| {
                    for section in [LayerSection::Models, LayerSection::PointClouds] {
                        body.spawn((
                            Name::new(section.title()),
                            Node {
                                display: Display::Flex,
                                flex_direction: FlexDirection::Column,
                                row_gap: Val::Px(4.0),
                                ..default()
                            },
                        ))
                        .with_children(|group| {
                            group.spawn((
                                Text::new(section.title()),
                                TextFont { font_size: 14.0, ..default() },
                                TextColor(MUTED_TEXT_COLOUR),
                            ));
                            group.spawn((
                                SectionList(section),
                                Node {
                                    display: Display::Flex,
                                    flex_direction: FlexDirection::Column,
                                    row_gap: Val::Px(2.0),
                                    ..default()
                                },
                            ));
                        });
                    }
                });
        });
}

pub fn chevron(collapsed: bool) -> &'static str {
    // Panel sits on the right edge, so it opens towards the left
    if collapsed { "<" } else { ">" }
}

fn spawn_toggle_row(commands: &mut Commands, list: Entity, layer: &RegisteredLayer) {
    let toggle = VisibilityToggle::new(layer.target);

    commands
        .spawn((
            toggle,
            Button,
            Name::new(format!("Toggle {}", layer.label)),
            BackgroundColor(Color::NONE),
            Node {
                width: Val::Percent(100.0),
                height: Val::Px(24.0),
                padding: UiRect::horizontal(Val::Px(4.0)),
                column_gap: Val::Px(8.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                ..default()
            },
            ChildOf(list),
        ))
        .with_children(|row| {
            row.spawn((
                ToggleCheck,
                Text::new(check_mark(toggle.visible)),
                TextFont { font_size: 14.0, ..default() },
                TextColor(TEXT_COLOUR),
            ));
            row.spawn((
                Text::new(layer.label.clone()),
                TextFont { font_size: 14.0, ..default() },
                TextColor(TEXT_COLOUR),
            ));
        });
}

/// Give every newly registered layer a row in its section, in registration order.
pub fn sync_toggle_rows(
    registry: Res<LayerRegistry>,
    mut spawned: ResMut<SpawnedRows>,
    lists: Query<(Entity, &SectionList)>,
    mut commands: Commands,
) {
    if spawned.0 >= registry.len() {
        return;
    }

    for layer in &registry.layers()[spawned.0..] {
        let Some((list, _)) = lists.iter().find(|(_, list)| list.0 == layer.section) else {
            // Panel not built yet; retry next frame
            return;
        };
        spawn_toggle_row(&mut commands, list, layer);
        spawned.0 += 1;
    }
}

pub fn apply_collapse_state(
    state: Res<PanelUiState>,
    mut nodes: ParamSet<(
        Query<&mut Node, With<PanelRoot>>,
        Query<&mut Node, With<PanelBody>>,
        Query<&mut Node, With<HeaderNode>>,
        Query<&mut Node, With<TitleText>>,
        Query<&mut Node, With<CollapseButton>>,
    )>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() {
        return;
    }

    if let Ok(mut n) = nodes.p0().single_mut() {
        n.width = Val::Px(state.width());
    }
    if let Ok(mut n) = nodes.p1().single_mut() {
        n.display = state.body_display();
    }
    if let Ok(mut n) = nodes.p2().single_mut() {
        let pad = if state.collapsed { 4.0 } else { 10.0 };
        n.padding = UiRect::all(Val::Px(pad));
        n.justify_content = if state.collapsed {
            JustifyContent::FlexEnd
        } else {
            JustifyContent::SpaceBetween
        };
    }
    if let Ok(mut n) = nodes.p3().single_mut() {
        n.display = state.body_display();
    }
    if let Ok(mut n) = nodes.p4().single_mut() {
        let s = if state.collapsed { 24.0 } else { 26.0 };
        n.width = Val::Px(s);
        n.height = Val::Px(s);
    }
    for mut t in &mut chevrons {
        *t = Text::new(chevron(state.collapsed));
    }
}
