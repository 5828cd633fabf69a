use crate::mesh::Mesh;
use std::fmt::{Debug, Write as _};
use std::io::Cursor;
use std::path::Path;

/// Export to ASCII STL
/// Convert this Mesh to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use pointcube::mesh::Mesh;
/// let mesh = Mesh::<()>::disc(1.0, 8, None);
/// let text = mesh.to_stl_ascii("marker");
/// assert!(text.starts_with("solid marker"));
/// ```
pub fn to_stl_ascii<S: Clone + Debug + Send + Sync>(mesh: &Mesh<S>, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    mesh.visit_triangles(|tri, n| {
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// The binary format has no room for a solid name, so none is taken.
pub fn to_stl_binary<S: Clone + Debug + Send + Sync>(mesh: &Mesh<S>) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    mesh.visit_triangles(|tri, n| {
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    let p = v.pos;
                    Vertex::new([p.x as f32, p.y as f32, p.z as f32])
                }),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Write `mesh` to `path`, ASCII when `ascii` is set, binary otherwise.
pub fn write_stl_file<S: Clone + Debug + Send + Sync>(
    mesh: &Mesh<S>,
    path: impl AsRef<Path>,
    name: &str,
    ascii: bool,
) -> std::io::Result<()> {
    let bytes = if ascii {
        to_stl_ascii(mesh, name).into_bytes()
    } else {
        to_stl_binary(mesh)?
    };
    std::fs::write(path, bytes)
}

impl<S: Clone + Debug + Send + Sync> Mesh<S> {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}
