//! Tabletop composition.
//!
//! Walks the scene depth-first with a [`TransformStack`] and records one
//! [`MeshDraw`](tabletop_engine::scene::MeshDraw) per object (floor, table top,
//! four legs, box). Every placement is relative to its parent
//! and undone with `restore()` before the next sibling.

use glam::{Mat4, Vec3};
use tabletop_engine::render::{MeshData, MeshRenderer, TextureData};
use tabletop_engine::scene::{DrawList, EmptyStackError, MeshId, TextureId, TransformStack};

/// Handles for everything the scene draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneAssets {
    pub floor: MeshId,
    pub cube: MeshId,
    pub floor_texture: TextureId,
    pub table_texture: TextureId,
    pub box_texture: TextureId,
}

/// Textures to register, in the order the scene uses them.
pub struct SceneTextures {
    pub floor: TextureData,
    pub table: TextureData,
    pub crate_box: TextureData,
}

impl SceneAssets {
    /// Registers the floor and cube meshes plus `textures` with `renderer`.
    pub fn register(renderer: &mut MeshRenderer, textures: SceneTextures) -> Self {
        Self {
            floor: renderer.add_mesh(MeshData::floor(FLOOR_HALF_EXTENT, FLOOR_UV_REPEAT)),
            cube: renderer.add_mesh(MeshData::cube()),
            floor_texture: renderer.add_texture(textures.floor),
            table_texture: renderer.add_texture(textures.table),
            box_texture: renderer.add_texture(textures.crate_box),
        }
    }
}

pub const FLOOR_HALF_EXTENT: f32 = 5.0;
pub const FLOOR_UV_REPEAT: f32 = 2.0;

const TABLE_HEIGHT: f32 = 1.1;
const LEG_OFFSET: f32 = 1.9;
const BOX_SCALE: f32 = 0.5;

/// Records the whole scene into `list`, starting from `view`.
///
/// Leaves `stack` balanced on success.
pub fn compose(
    stack: &mut TransformStack,
    list: &mut DrawList,
    projection: Mat4,
    view: Mat4,
    assets: &SceneAssets,
    box_position: Vec3,
) -> Result<(), EmptyStackError> {
    stack.reset(view);
    list.begin(projection);

    list.push(stack, assets.floor, assets.floor_texture);

    stack.save();
    stack.translate(Vec3::new(0.0, TABLE_HEIGHT, 0.0));
    draw_table(stack, list, assets)?;
    stack.restore()?;

    stack.scoped(|stack| {
        stack.translate(box_position);
        stack.scale(Vec3::splat(BOX_SCALE));
        list.push(stack, assets.cube, assets.box_texture);
        Ok::<_, EmptyStackError>(())
    })?;

    debug_assert!(stack.is_balanced());
    Ok(())
}

/// Table top plus four legs, relative to the table origin.
fn draw_table(
    stack: &mut TransformStack,
    list: &mut DrawList,
    assets: &SceneAssets,
) -> Result<(), EmptyStackError> {
    stack.save();
    stack.translate(Vec3::new(0.0, 1.0, 0.0));
    stack.scale(Vec3::new(2.0, 0.1, 2.0));
    list.push(stack, assets.cube, assets.table_texture);
    stack.restore()?;

    for i in [-1.0f32, 1.0] {
        for j in [-1.0f32, 1.0] {
            stack.save();
            stack.translate(Vec3::new(i * LEG_OFFSET, -0.1, j * LEG_OFFSET));
            stack.scale(Vec3::new(0.1, 1.0, 0.1));
            list.push(stack, assets.cube, assets.table_texture);
            stack.restore()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> SceneAssets {
        SceneAssets {
            floor: MeshId(0),
            cube: MeshId(1),
            floor_texture: TextureId(0),
            table_texture: TextureId(1),
            box_texture: TextureId(2),
        }
    }

    fn origin(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn records_seven_draws_and_balances() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        compose(&mut stack, &mut list, Mat4::IDENTITY, Mat4::IDENTITY, &assets(), Vec3::new(0.0, 2.7, 0.0))
            .unwrap();

        assert_eq!(list.len(), 7);
        assert!(stack.is_balanced());
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn draw_order_and_textures() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let a = assets();
        compose(&mut stack, &mut list, Mat4::IDENTITY, Mat4::IDENTITY, &a, Vec3::ZERO).unwrap();

        let items = list.items();
        assert_eq!((items[0].mesh, items[0].texture), (a.floor, a.floor_texture));
        for d in &items[1..6] {
            assert_eq!((d.mesh, d.texture), (a.cube, a.table_texture));
        }
        assert_eq!((items[6].mesh, items[6].texture), (a.cube, a.box_texture));
    }

    #[test]
    fn table_parts_are_placed_under_table_origin() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        compose(&mut stack, &mut list, Mat4::IDENTITY, Mat4::IDENTITY, &assets(), Vec3::ZERO).unwrap();

        let items = list.items();
        assert!((origin(items[1].model_view) - Vec3::new(0.0, 2.1, 0.0)).length() < 1e-5);
        assert!((origin(items[2].model_view) - Vec3::new(-1.9, 1.0, -1.9)).length() < 1e-5);
        assert!((origin(items[5].model_view) - Vec3::new(1.9, 1.0, 1.9)).length() < 1e-5);
    }

    #[test]
    fn box_is_placed_in_world_space() {
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        let pos = Vec3::new(4.0, 5.0, 0.0);
        compose(&mut stack, &mut list, Mat4::IDENTITY, Mat4::IDENTITY, &assets(), pos).unwrap();

        let m = list.items()[6].model_view;
        assert!((origin(m) - pos).length() < 1e-5);
        // Unit cube corner lands half a unit from the centre.
        assert!((m.transform_point3(Vec3::ONE) - (pos + Vec3::splat(0.5))).length() < 1e-5);
    }

    #[test]
    fn view_prefixes_every_draw() {
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        compose(&mut stack, &mut list, Mat4::IDENTITY, view, &assets(), Vec3::ZERO).unwrap();

        assert_eq!(list.items()[0].model_view, view);
        assert_eq!(stack.current(), view);
    }

    #[test]
    fn projection_is_recorded() {
        let proj = Mat4::from_scale(Vec3::splat(0.5));
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        compose(&mut stack, &mut list, proj, Mat4::IDENTITY, &assets(), Vec3::ZERO).unwrap();
        assert_eq!(list.projection(), proj);
    }
}
