mod support;

use nalgebra::{Point3, Vector3};
use pointcube::{
    Assembler, Axis, Cell, FaceState, GeometryService, ObjectHandle, PointCubeError, Scene,
    assembler::POINT_ORIENTATION,
    errors::Result,
    float_types::{FRAC_PI_2, Real},
    mesh::Mesh,
    scene::SceneObject,
    traits::Transformable,
};
use rand::{SeedableRng, rngs::StdRng};
use support::{approx_eq, full_range, params, sampler, vertical_gradient};

fn assembler() -> Assembler<Scene, StdRng> {
    Assembler::new(Scene::new(), StdRng::seed_from_u64(42))
}

fn cells(n: u32) -> Vec<Cell> {
    (0..n)
        .map(|i| Cell {
            x_idx: i,
            z_idx: n - i,
            size: 0.25,
        })
        .collect()
}

/// Records every primitive request and keeps objects as plain names.
#[derive(Default)]
struct RecordingService {
    created: Vec<(Point3<Real>, Real, Vector3<Real>, String)>,
    objects: Vec<(ObjectHandle, String, Vector3<Real>)>,
}

impl GeometryService for RecordingService {
    fn create_point_primitive(
        &mut self,
        position: Point3<Real>,
        radius: Real,
        orientation: Vector3<Real>,
        tag: &str,
    ) -> Result<ObjectHandle> {
        let handle = ObjectHandle(self.created.len() as u64);
        self.created
            .push((position, radius, orientation, tag.to_string()));
        self.objects.push((handle, tag.to_string(), orientation));
        Ok(handle)
    }

    fn select_and_join(&mut self, handles: &[ObjectHandle], name: &str) -> Result<ObjectHandle> {
        let first = handles[0];
        self.objects
            .retain(|(h, _, _)| *h == first || !handles.contains(h));
        for ob in &mut self.objects {
            if ob.0 == first {
                ob.1 = name.to_string();
            }
        }
        Ok(first)
    }

    fn set_rotation(&mut self, handle: ObjectHandle, axis: Axis, radians: Real) -> Result<()> {
        let ob = self
            .objects
            .iter_mut()
            .find(|ob| ob.0 == handle)
            .ok_or(PointCubeError::UnknownObject(handle))?;
        ob.2[axis.index()] = radians;
        Ok(())
    }

    fn rotation(&self, handle: ObjectHandle) -> Option<Vector3<Real>> {
        self.objects.iter().find(|ob| ob.0 == handle).map(|ob| ob.2)
    }

    fn list_scene_objects(&self) -> Vec<(ObjectHandle, String)> {
        self.objects.iter().map(|ob| (ob.0, ob.1.clone())).collect()
    }
}

#[test]
fn emit_then_merge_yields_one_object_per_face() {
    let mut asm = assembler();
    let s = sampler(&full_range(12, 12), params(4, false));
    let expected = s.cells().count();

    let assembly = asm.emit_face("front", &s, 20).unwrap();
    assert_eq!(assembly.primitives, expected);
    assert_eq!(asm.face_state("front"), FaceState::Merged);

    let scene = asm.service();
    let objects = scene.list_scene_objects();
    assert_eq!(objects, vec![(assembly.handle, "front".to_string())]);

    let merged = scene.object(assembly.handle).unwrap();
    assert_eq!(merged.mesh.polygon_count(), expected);
    assert!(
        merged
            .mesh
            .polygons
            .iter()
            .all(|p| p.metadata().map(String::as_str) == Some("front"))
    );
}

#[test]
fn primitives_are_requested_at_cell_positions() {
    let mut asm = Assembler::new(RecordingService::default(), StdRng::seed_from_u64(1));
    asm.emit_face("side", cells(5), 10).unwrap();

    let created = &asm.service().created;
    assert_eq!(created.len(), 5);
    for (i, (pos, radius, orientation, tag)) in created.iter().enumerate() {
        assert_eq!(pos.x, i as Real);
        assert_eq!(pos.z, (5 - i) as Real);
        assert_eq!(pos.y, pos.y.round());
        assert!((0.0..=10.0).contains(&pos.y));
        assert_eq!(*radius, 0.25);
        assert_eq!(*orientation, POINT_ORIENTATION);
        assert_eq!(tag, "side");
    }

    let scene = asm.into_service();
    assert_eq!(scene.list_scene_objects().len(), 1);
}

#[test]
fn merged_face_has_octagon_vertices_facing_y() {
    let mut asm = assembler();
    let assembly = asm.emit_face("front", cells(3), 0).unwrap();

    let world = asm.service().world_mesh(assembly.handle).unwrap();
    for poly in &world.polygons {
        assert_eq!(poly.vertices.len(), 8);
        let n = poly.normal();
        assert!(approx_eq(n.y.abs(), 1.0, 1e-9), "normal {n:?}");
    }
    // y_max = 0 pins every disc to the y = 0 plane
    let bb = world.bounding_box();
    assert!(approx_eq(bb.mins.y, 0.0, 1e-9));
    assert!(approx_eq(bb.maxs.y, 0.0, 1e-9));
}

#[test]
fn jitter_is_deterministic_for_a_seed() {
    let run = || {
        let mut asm = Assembler::new(RecordingService::default(), StdRng::seed_from_u64(9));
        asm.emit_face("top", cells(16), 20).unwrap();
        asm.into_service()
            .created
            .iter()
            .map(|c| c.0.y)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn empty_face_fails_with_no_primitives() {
    let mut asm = assembler();
    let err = asm.emit_face("top", Vec::new(), 20).unwrap_err();
    assert!(matches!(err, PointCubeError::NoPrimitives { ref face } if face == "top"));
    assert!(asm.service().is_empty());
}

/// A scene holding an unrelated object whose name starts with "front".
fn assembler_with_frontier() -> (Assembler<Scene, StdRng>, ObjectHandle) {
    let mut scene = Scene::new();
    let frontier = scene.insert(SceneObject {
        name: "frontier".to_string(),
        location: Point3::new(100.0, 0.0, 0.0),
        rotation: Vector3::zeros(),
        mesh: Mesh::point_marker(1.0, Some("frontier".to_string())),
    });
    (Assembler::new(scene, StdRng::seed_from_u64(42)), frontier)
}

#[test]
fn empty_face_ignores_objects_with_similar_names() {
    let (mut asm, frontier) = assembler_with_frontier();

    let err = asm.emit_face("front", Vec::<Cell>::new(), 5).unwrap_err();
    assert!(matches!(err, PointCubeError::NoPrimitives { ref face } if face == "front"));

    let scene = asm.service();
    assert_eq!(scene.list_scene_objects(), vec![(frontier, "frontier".to_string())]);
    let object = scene.object(frontier).unwrap();
    assert_eq!(object.location, Point3::new(100.0, 0.0, 0.0));
    assert_eq!(object.mesh.polygon_count(), 1);
}

#[test]
fn merge_joins_only_the_face_primitives() {
    let (mut asm, frontier) = assembler_with_frontier();

    let assembly = asm.emit_face("front", cells(3), 5).unwrap();
    assert_eq!(assembly.primitives, 3);
    assert_ne!(assembly.handle, frontier);

    let scene = asm.service();
    let mut names: Vec<String> = scene
        .list_scene_objects()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["front".to_string(), "frontier".to_string()]);

    let merged = scene.object(assembly.handle).unwrap();
    assert_eq!(merged.mesh.polygon_count(), 3);
    assert!(
        merged
            .mesh
            .polygons
            .iter()
            .all(|p| p.metadata().map(String::as_str) == Some("front"))
    );

    let object = scene.object(frontier).unwrap();
    assert_eq!(object.name, "frontier");
    assert_eq!(object.mesh.polygon_count(), 1);
}

#[test]
fn a_merged_face_cannot_be_emitted_again() {
    let mut asm = assembler();
    asm.emit_face("front", cells(2), 5).unwrap();

    let err = asm.emit_face("front", cells(2), 5).unwrap_err();
    assert!(matches!(err, PointCubeError::InvalidTransition { .. }));
    assert_eq!(asm.service().len(), 1);
}

#[test]
fn finalize_rotates_side_and_top_only() {
    let mut asm = assembler();
    let s = sampler(&vertical_gradient(), params(2, false));
    let front = asm.emit_face("front", &s, 4).unwrap();
    let side = asm.emit_face("side", &s, 4).unwrap();
    let top = asm.emit_face("top", &s, 4).unwrap();

    let rotated = asm.finalize_orientation().unwrap();
    assert_eq!(rotated, vec!["side".to_string(), "top".to_string()]);

    let scene = asm.service();
    assert_eq!(scene.rotation(front.handle), Some(POINT_ORIENTATION));
    assert_eq!(
        scene.rotation(side.handle),
        Some(Vector3::new(FRAC_PI_2, 0.0, FRAC_PI_2))
    );
    assert_eq!(scene.rotation(top.handle), Some(Vector3::zeros()));

    assert_eq!(asm.face_state("front"), FaceState::Merged);
    assert_eq!(asm.face_state("side"), FaceState::Reoriented);
    assert_eq!(asm.face_state("top"), FaceState::Reoriented);

    // a second pass does not turn anything further
    assert!(asm.finalize_orientation().unwrap().is_empty());
}

#[test]
fn finalize_with_only_front_is_a_no_op() {
    let mut asm = assembler();
    let front = asm.emit_face("front", cells(4), 3).unwrap();
    let before = asm.service().world_mesh(front.handle).unwrap();

    assert!(asm.finalize_orientation().unwrap().is_empty());

    let after = asm.service().world_mesh(front.handle).unwrap();
    assert_eq!(before.vertices(), after.vertices());
    assert_eq!(asm.face_state("front"), FaceState::Merged);
}

#[test]
fn negative_radius_aborts_the_face() {
    let mut asm = assembler();
    let bad = vec![
        Cell {
            x_idx: 0,
            z_idx: 0,
            size: 0.5,
        },
        Cell {
            x_idx: 1,
            z_idx: 0,
            size: -1.0,
        },
    ];
    let err = asm.emit_face("front", bad, 3).unwrap_err();
    assert!(matches!(err, PointCubeError::InvalidConfig(_)));
    assert_eq!(
        asm.face_state("front"),
        FaceState::Emitting { cells_processed: 1 }
    );
}
