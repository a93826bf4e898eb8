//! Build one mesh from the command line and print its statistics.
//!
//! ```text
//! cargo run --example mesh_report -- --shape octahedron --iterations 4
//! cargo run --example mesh_report -- --shape uv-sphere --segments 32 --accumulation average
//! ```

use clap::Parser;
use geometry_engine::{
    DegeneratePolicy, MeshData, MeshRecipe, Shape, TangentAccumulation, TangentOptions,
    TessellateOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliShape {
    Grid,
    #[default]
    Cube,
    Octahedron,
    UvSphere,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
enum CliAccumulation {
    /// Last triangle touching a vertex wins
    #[default]
    Overwrite,
    /// Sum contributions and normalize once
    Average,
}

/// Procedural mesh statistics.
#[derive(Parser, Debug)]
#[command(name = "mesh_report", about = "Build a procedural mesh and report its statistics")]
struct Args {
    /// Seed shape
    #[arg(long, default_value = "cube", value_enum)]
    shape: CliShape,

    /// Segments per axis for grids and UV spheres
    #[arg(long, default_value = "10")]
    segments: u32,

    /// Tessellation rounds
    #[arg(long, default_value = "0")]
    iterations: u32,

    /// Project tessellated vertices onto the unit sphere
    #[arg(long)]
    project: bool,

    /// Tangent accumulation mode
    #[arg(long, default_value = "overwrite", value_enum)]
    accumulation: CliAccumulation,

    /// Substitute a frame for degenerate UVs instead of failing
    #[arg(long)]
    fallback: bool,
}

impl Args {
    fn recipe(&self) -> MeshRecipe {
        let shape = match self.shape {
            CliShape::Grid => Shape::Grid {
                x_segments: self.segments,
                y_segments: self.segments,
            },
            CliShape::Cube => Shape::Cube,
            CliShape::Octahedron => Shape::Octahedron,
            CliShape::UvSphere => Shape::UvSphere {
                x_segments: self.segments,
                y_segments: self.segments,
            },
            CliShape::Triangle => Shape::Triangle,
        };

        let mut recipe = MeshRecipe::new(shape).with_iterations(self.iterations);
        if self.project {
            recipe = recipe.with_tessellation(TessellateOptions::new().with_unit_sphere_projection(true));
        }

        let accumulation = match self.accumulation {
            CliAccumulation::Overwrite => TangentAccumulation::Overwrite,
            CliAccumulation::Average => TangentAccumulation::Average,
        };
        let mut tangents = recipe.tangents.with_accumulation(accumulation);
        if self.fallback {
            tangents = tangents.with_degenerate_policy(DegeneratePolicy::Fallback);
        }
        recipe.with_tangents(tangents)
    }
}

fn report(label: &str, mesh: &MeshData) {
    let buffers = mesh.to_buffers();
    let (min, max) = mesh
        .vertices
        .iter()
        .fold((glam::Vec3::splat(f32::MAX), glam::Vec3::splat(f32::MIN)), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    println!("{label}");
    println!("  vertices:  {}", mesh.vertex_count());
    println!("  triangles: {}", mesh.triangle_count());
    println!("  bounds:    {min} .. {max}");
    println!("  fallback:  {} substitute tangent frames", mesh.fallback_vertices.len());
    println!(
        "  upload:    {} vertex bytes, {} index bytes",
        bytemuck::cast_slice::<_, u8>(&mesh.interleaved()).len(),
        buffers.index_bytes().len()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let recipe = args.recipe();
    match recipe.build() {
        Ok(mesh) => report(recipe.label(), &mesh),
        Err(err) => {
            log::error!("failed to build {}: {err}", recipe.label());
            std::process::exit(1);
        }
    }
}
