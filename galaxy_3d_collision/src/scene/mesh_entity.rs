/// MeshEntity: static indexed triangle mesh.
///
/// Positions and indices stay in local space. A mesh is split into one or
/// more sub-meshes, each with its own vertex/index range and bounds; when
/// there is more than one, collisions and frustum tests are refined per
/// sub-mesh after the whole-mesh test passes.

use std::cell::RefCell;
use std::ops::Range;
use glam::{Mat4, Vec3};
use crate::camera::Frustum;
use crate::collision::{Collider, Winding};
use crate::culling::BoundingInfo;
use crate::engine_bail;
use crate::engine_debug;
use crate::error::Result;
use super::entity::{Collidable, EntityFlags};

// ===== SUB-MESH =====

/// Sub-mesh vertices in the ellipsoid space of the last collider that reached them.
#[derive(Debug, Clone)]
struct ColliderVertices {
    /// `scale(1 / radius) * world` the vertices were produced with
    transform: Mat4,
    vertices: Vec<Vec3>,
}

/// Contiguous part of a mesh's index list.
#[derive(Debug, Clone)]
pub struct SubMesh {
    vertex_start: usize,
    vertex_count: usize,
    index_start: usize,
    index_count: usize,
    bounding_info: BoundingInfo,
    collider_vertices: RefCell<Option<ColliderVertices>>,
}

impl SubMesh {
    fn new(
        positions: &[Vec3],
        vertex_start: usize,
        vertex_count: usize,
        index_start: usize,
        index_count: usize,
    ) -> Result<Self> {
        Ok(Self {
            vertex_start,
            vertex_count,
            index_start,
            index_count,
            bounding_info: BoundingInfo::new(positions, vertex_start, vertex_count)?,
            collider_vertices: RefCell::new(None),
        })
    }

    /// Sub-mesh over `indices[index_start..index_start + index_count]`.
    ///
    /// The vertex range spans the smallest to largest referenced vertex.
    fn from_indices(
        positions: &[Vec3],
        indices: &[u32],
        index_start: usize,
        index_count: usize,
    ) -> Result<Self> {
        let Some(slice) = indices.get(index_start..index_start + index_count) else {
            engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "index range {}+{} out of bounds ({} indices)", index_start, index_count, indices.len());
        };
        let (Some(min), Some(max)) = (slice.iter().min(), slice.iter().max()) else {
            engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "sub-mesh at index {} has no indices", index_start);
        };

        let vertex_start = *min as usize;
        let vertex_count = (*max - *min) as usize + 1;
        Self::new(positions, vertex_start, vertex_count, index_start, index_count)
    }

    pub fn vertex_range(&self) -> Range<usize> {
        self.vertex_start..self.vertex_start + self.vertex_count
    }

    pub fn index_range(&self) -> Range<usize> {
        self.index_start..self.index_start + self.index_count
    }

    pub fn bounding_info(&self) -> &BoundingInfo {
        &self.bounding_info
    }

    /// Submit this sub-mesh's triangles, transformed by `transform`.
    ///
    /// Only the sub-mesh's own vertex range is transformed, and the result
    /// is reused until the transform changes.
    fn collide(
        &self,
        positions: &[Vec3],
        indices: &[u32],
        transform: &Mat4,
        winding: Winding,
        double_sided: bool,
        collider: &mut Collider,
    ) {
        let mut cached = self.collider_vertices.borrow_mut();
        let vertices = match cached.take() {
            Some(entry) if entry.transform == *transform => entry,
            _ => ColliderVertices {
                transform: *transform,
                vertices: positions
                    .get(self.vertex_range())
                    .unwrap_or_default()
                    .iter()
                    .map(|p| transform.transform_point3(*p))
                    .collect(),
            },
        };

        collider.collide(
            &vertices.vertices,
            indices,
            self.index_range(),
            self.vertex_start,
            winding,
            double_sided,
        );
        *cached = Some(vertices);
    }
}

// ===== MESH ENTITY =====

pub struct MeshEntity {
    name: String,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    submeshes: Vec<SubMesh>,
    bounding_info: BoundingInfo,
    world_matrix: Mat4,
    flags: EntityFlags,
}

impl MeshEntity {
    /// Create a mesh from local positions and a triangle list.
    ///
    /// Starts with a single sub-mesh covering everything and an identity
    /// world matrix.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if there are no positions, the index count is not a
    /// multiple of 3, or an index references a missing vertex.
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        let name = name.into();
        if indices.len() % 3 != 0 {
            engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "mesh '{}': {} indices is not a whole number of triangles", name, indices.len());
        }
        if let Some(index) = indices.iter().find(|i| **i as usize >= positions.len()) {
            engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "mesh '{}': index {} references a missing vertex ({} vertices)", name, index, positions.len());
        }

        let bounding_info = BoundingInfo::new(&positions, 0, positions.len())?;
        let submeshes = if indices.is_empty() {
            Vec::new()
        } else {
            vec![SubMesh::new(&positions, 0, positions.len(), 0, indices.len())?]
        };

        Ok(Self {
            name,
            positions,
            indices,
            submeshes,
            bounding_info,
            world_matrix: Mat4::IDENTITY,
            flags: EntityFlags::default(),
        })
    }

    /// Create a mesh from a flat `[x, y, z, x, y, z, ...]` buffer.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` if the buffer length is not a multiple of 3, plus
    /// everything `new` rejects.
    pub fn from_raw_positions(name: impl Into<String>, raw: &[f32], indices: Vec<u32>) -> Result<Self> {
        let name = name.into();
        let positions: &[Vec3] = match bytemuck::try_cast_slice(raw) {
            Ok(positions) => positions,
            Err(error) => engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "mesh '{}': {} floats do not form xyz positions ({})", name, raw.len(), error),
        };
        Self::new(name, positions.to_vec(), indices)
    }

    pub fn with_flags(mut self, flags: EntityFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_world_matrix(mut self, matrix: Mat4) -> Self {
        self.world_matrix = matrix;
        self.update_bounds();
        self
    }

    // ===== ACCESSORS =====

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn submeshes(&self) -> &[SubMesh] {
        &self.submeshes
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn set_check_collisions(&mut self, enabled: bool) {
        self.flags.set(EntityFlags::CHECK_COLLISIONS, enabled);
    }

    // ===== SUB-MESHES =====

    /// Split the index list into `count` sub-meshes of whole triangles.
    ///
    /// The last sub-mesh takes the remainder.
    pub fn subdivide(&mut self, count: usize) -> Result<()> {
        let triangles = self.triangle_count();
        if count == 0 || count > triangles {
            engine_bail!(InvalidGeometry, "galaxy3d::MeshEntity",
                "mesh '{}': cannot split {} triangles into {} sub-meshes", self.name, triangles, count);
        }

        let size = (triangles / count) * 3;
        let mut submeshes = Vec::with_capacity(count);
        for i in 0..count {
            let start = i * size;
            let length = if i + 1 == count { self.indices.len() - start } else { size };
            submeshes.push(SubMesh::from_indices(&self.positions, &self.indices, start, length)?);
        }

        self.submeshes = submeshes;
        self.refresh_submesh_bounds();
        engine_debug!("galaxy3d::MeshEntity", "mesh '{}' split into {} sub-meshes", self.name, count);
        Ok(())
    }

    // ===== QUERIES =====

    /// Bounding-volume overlap with another entity.
    pub fn intersects_mesh(&self, other: &dyn Collidable, precise: bool) -> bool {
        self.bounding_info.intersects(other.bounding_info(), precise)
    }

    pub fn intersects_point(&self, point: Vec3) -> bool {
        self.bounding_info.intersects_point(point)
    }

    fn refresh_submesh_bounds(&mut self) {
        for submesh in &mut self.submeshes {
            submesh.bounding_info.update(&self.world_matrix);
        }
    }
}

impl Collidable for MeshEntity {
    fn name(&self) -> &str {
        &self.name
    }

    fn flags(&self) -> EntityFlags {
        self.flags
    }

    fn set_flags(&mut self, flags: EntityFlags) {
        self.flags = flags;
    }

    fn bounding_info(&self) -> &BoundingInfo {
        &self.bounding_info
    }

    fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
    }

    fn update_bounds(&mut self) {
        self.bounding_info.update(&self.world_matrix);
        self.refresh_submesh_bounds();
    }

    fn is_in_frustum(&self, frustum: &Frustum) -> bool {
        if !self.bounding_info.is_in_frustum(frustum.planes()) {
            return false;
        }
        if self.submeshes.len() <= 1 {
            return true;
        }
        self.submeshes.iter().any(|s| s.bounding_info.is_in_frustum(frustum.planes()))
    }

    fn check_collision(&self, collider: &mut Collider) {
        if !self.bounding_info.check_collision(collider) {
            return;
        }

        // Into the collider's ellipsoid space
        let transform = Mat4::from_scale(collider.radius().recip()) * self.world_matrix;
        let winding = Winding::of_transform(&self.world_matrix);
        let double_sided = self.is_double_sided();

        let refine = self.submeshes.len() > 1;
        for submesh in &self.submeshes {
            if refine && !submesh.bounding_info.check_collision(collider) {
                continue;
            }
            submesh.collide(&self.positions, &self.indices, &transform, winding, double_sided, collider);
        }
    }
}

#[cfg(test)]
#[path = "mesh_entity_tests.rs"]
mod tests;
