//! Voxel session: owns the world and sequences edits before drawing

use crate::core::camera::Camera;
use crate::core::types::{IVec3, Result, Vec3};
use crate::math::Ray;
use crate::voxel::edit::{EditController, EditLog, EditRecord};
use crate::voxel::face::{visible_cells, FaceSet};
use crate::voxel::mesh::FaceMesh;
use crate::voxel::raycast::VoxelHit;
use crate::voxel::{VoxelGrid, WorldMapping};
use super::config::WorldConfig;

/// What one frame produced
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Frame number, starting at 0
    pub frame: u64,
    /// Picks that removed a voxel this frame, in the order they were queued
    pub removed: Vec<VoxelHit>,
    /// Picks queued this frame that hit nothing
    pub missed: usize,
    /// Solid cells with at least one exposed face, after this frame's edits
    pub visible: Vec<(IVec3, FaceSet)>,
    /// Total exposed faces across `visible`
    pub exposed_faces: usize,
}

/// A single-user voxel world driven once per frame by an external loop.
///
/// Picks queued between frames are applied at the start of the next
/// [`VoxelSession::frame`] call, before visibility is computed, so a removed
/// voxel never shows up in the frame that removed it.
pub struct VoxelSession {
    grid: VoxelGrid,
    mapping: WorldMapping,
    editor: EditController,
    log: EditLog,
    camera: Camera,
    pending: Vec<Ray>,
    frame: u64,
}

impl VoxelSession {
    /// Create and seed a world from configuration
    pub fn new(config: &WorldConfig) -> Result<Self> {
        let grid = VoxelGrid::from_seed(config.dims, &config.seed)?;
        let mapping = config.mapping();
        let camera = Camera::look_at(config.camera_position, config.camera_target, Vec3::Y);

        log::info!(
            "Seeded {}x{}x{} world with {} solid voxels (offset {})",
            config.dims.x, config.dims.y, config.dims.z,
            grid.solid_count(),
            mapping.offset
        );

        Ok(Self {
            grid,
            mapping,
            editor: EditController::new(config.pick_distance),
            log: EditLog::new(),
            camera,
            pending: Vec::new(),
            frame: 0,
        })
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn mapping(&self) -> &WorldMapping {
        &self.mapping
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn edit_log(&self) -> &EditLog {
        &self.log
    }

    /// Number of frames completed
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Queue a world-space pick ray for the next frame
    pub fn queue_pick(&mut self, ray: Ray) {
        self.pending.push(ray);
    }

    /// Queue a pick through the center of the camera's view
    pub fn queue_center_pick(&mut self) -> Result<()> {
        let ray = self.camera.center_ray()?;
        self.queue_pick(ray);
        Ok(())
    }

    /// Apply queued picks, then report what should be drawn
    pub fn frame(&mut self) -> FrameReport {
        let mut report = FrameReport {
            frame: self.frame,
            ..Default::default()
        };

        for ray in std::mem::take(&mut self.pending) {
            match self.editor.pick_world(&ray, &mut self.grid, &self.mapping) {
                Some(hit) => {
                    self.log.record(self.frame, hit.coord);
                    report.removed.push(hit);
                }
                None => report.missed += 1,
            }
        }

        report.visible = visible_cells(&self.grid).collect();
        report.exposed_faces = report.visible.iter().map(|(_, faces)| faces.len()).sum();

        if !report.removed.is_empty() {
            log::debug!(
                "Frame {}: removed {} voxel(s), {} faces exposed",
                self.frame, report.removed.len(), report.exposed_faces
            );
        }

        self.frame += 1;
        report
    }

    /// World-space mesh of the current grid
    pub fn mesh(&self) -> Result<FaceMesh> {
        FaceMesh::build(&self.grid, &self.mapping)
    }

    /// Revert the most recent removal
    pub fn undo(&mut self) -> Result<Option<EditRecord>> {
        self.log.undo_last(&mut self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UVec3;
    use crate::voxel::SeedPattern;

    fn session() -> VoxelSession {
        VoxelSession::new(&WorldConfig::default()).unwrap()
    }

    #[test]
    fn test_seeded_from_config() {
        let session = session();
        assert_eq!(session.grid().dims(), UVec3::new(8, 4, 8));
        assert_eq!(session.grid().solid_count(), 256);
    }

    #[test]
    fn test_invalid_dims_rejected() {
        let config = WorldConfig { dims: UVec3::new(0, 4, 8), ..Default::default() };
        assert!(VoxelSession::new(&config).is_err());
    }

    #[test]
    fn test_removed_voxel_absent_from_same_frame() {
        let mut session = session();
        session.queue_pick(Ray::try_new(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y).unwrap());

        let report = session.frame();
        assert_eq!(report.removed.len(), 1);
        let removed = report.removed[0].coord;
        assert_eq!(removed, IVec3::new(4, 3, 4));
        assert!(report.visible.iter().all(|(cell, _)| *cell != removed));
        assert_eq!(session.grid().solid_count(), 255);
    }

    #[test]
    fn test_center_pick_from_default_camera() {
        let mut session = session();
        session.queue_center_pick().unwrap();
        let report = session.frame();
        assert_eq!(report.removed.len(), 1);
        assert_eq!(report.missed, 0);
        // Camera at (0, 10, 10) looking at the origin strikes the top layer
        assert_eq!(report.removed[0].face, Some(crate::voxel::Face::PosY));
    }

    #[test]
    fn test_picks_apply_in_order() {
        let mut session = session();
        let down = Ray::try_new(Vec3::new(0.5, 10.0, 0.5), Vec3::NEG_Y).unwrap();
        session.queue_pick(down);
        session.queue_pick(down);
        let report = session.frame();
        let coords: Vec<IVec3> = report.removed.iter().map(|h| h.coord).collect();
        assert_eq!(coords, vec![IVec3::new(4, 3, 4), IVec3::new(4, 2, 4)]);
        assert_eq!(session.edit_log().len(), 2);
    }

    #[test]
    fn test_miss_counted_and_grid_unchanged() {
        let mut session = session();
        session.queue_pick(Ray::try_new(Vec3::new(0.0, 10.0, 0.0), Vec3::Y).unwrap());
        let report = session.frame();
        assert!(report.removed.is_empty());
        assert_eq!(report.missed, 1);
        assert_eq!(session.grid().solid_count(), 256);
    }

    #[test]
    fn test_frame_without_picks_reports_shell() {
        let mut session = session();
        let report = session.frame();
        assert_eq!(report.frame, 0);
        assert_eq!(report.exposed_faces, 2 * (8 * 4 + 4 * 8 + 8 * 8));
        assert_eq!(session.mesh().unwrap().quad_count(), report.exposed_faces);
        assert_eq!(session.frame().frame, 1);
        assert_eq!(session.frame_count(), 2);
    }

    #[test]
    fn test_undo_restores_last_removal() {
        let config = WorldConfig {
            dims: UVec3::splat(4),
            centered: false,
            seed: SeedPattern::Full,
            ..Default::default()
        };
        let mut session = VoxelSession::new(&config).unwrap();
        session.queue_pick(Ray::try_new(Vec3::new(1.5, 10.0, 1.5), Vec3::NEG_Y).unwrap());
        session.frame();
        assert!(!session.grid().is_solid(1, 3, 1));

        let record = session.undo().unwrap().unwrap();
        assert_eq!(record.coord, IVec3::new(1, 3, 1));
        assert!(session.grid().is_solid(1, 3, 1));
        assert!(session.undo().unwrap().is_none());
    }
}
