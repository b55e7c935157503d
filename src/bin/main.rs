//! Craft Scene CLI
//!
//! Export item and recipe scenes, and generate asset metadata.

use clap::{Parser, Subcommand};
use craft_scene::tools::{write_manifests, write_roots};
use craft_scene::{
    ArchiveSource, AssetSource, DirectorySource, Item, NodeRef, ObjExport, Recipe, Session,
    SessionConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tokio::task::LocalSet;

#[derive(Parser)]
#[command(name = "craft-scene")]
#[command(author, version, about = "Build 3D scenes of Minecraft items and recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Asset directory, ZIP archive or (with the `http` feature) base URL
    #[arg(short, long)]
    assets: String,

    /// Directory inside a ZIP archive holding the assets
    #[arg(long, default_value = "assets/minecraft/")]
    archive_root: String,

    /// Session configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an item model (first name is shown) as OBJ
    Model {
        /// Item names (e.g., "minecraft:stone" or "stone")
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        source: SourceArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export a recipe scene as OBJ
    Recipe {
        /// Recipe name (e.g., "minecraft:chest")
        name: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List recipes whose result is never used as an ingredient
    Roots {
        /// Directory of recipe JSON files
        #[arg(short, long)]
        recipes: PathBuf,

        /// Output JSON file
        #[arg(short, long, default_value = "generated/roots.json")]
        output: PathBuf,
    },

    /// Write per-directory file listings of an asset tree
    Manifest {
        /// Asset root directory
        #[arg(short, long)]
        root: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Directory names to skip
        #[arg(short, long, default_value = "gui")]
        ignore: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Model { names, source, output } => {
            let session = open_session(&source)?;
            run_local(async {
                let item = Item::load(&session, names.as_slice()).await?;
                export_scene(&item.node(), &output)
            })?;
            print_stats(&session);
        }
        Commands::Recipe { name, source, output } => {
            let session = open_session(&source)?;
            run_local(async {
                let recipe = Recipe::load(&session, &name).await?;
                match recipe.layout() {
                    Some(layout) => println!(
                        "Recipe {} ({}): {} slots",
                        recipe.name(),
                        layout.workstation,
                        layout.slots.len()
                    ),
                    None => println!(
                        "Recipe {} has type {}, nothing to draw",
                        recipe.name(),
                        recipe.descriptor().type_name()
                    ),
                }
                export_scene(&recipe.node(), &output)
            })?;
            print_stats(&session);
        }
        Commands::Roots { recipes, output } => {
            let roots = write_roots(&recipes, &output)?;
            println!("Wrote {} roots to {:?}", roots.len(), output);
        }
        Commands::Manifest { root, output, ignore } => {
            let ignore: Vec<&str> = ignore.iter().map(String::as_str).collect();
            let written = write_manifests(&root, &output, &ignore)?;
            println!("Wrote {} manifests to {:?}", written.len(), output);
        }
    }

    Ok(())
}

/// Run a future on a current-thread runtime inside a `LocalSet`.
fn run_local<F>(future: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    LocalSet::new().block_on(&runtime, future)
}

fn open_session(args: &SourceArgs) -> Result<Rc<Session>, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => serde_json::from_str::<SessionConfig>(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };

    println!("Loading assets from {}...", args.assets);
    Ok(Session::with_config(open_source(args)?, config))
}

fn open_source(args: &SourceArgs) -> Result<Box<dyn AssetSource>, Box<dyn std::error::Error>> {
    if let Some(source) = open_http(&args.assets) {
        return Ok(source);
    }

    let path = Path::new(&args.assets);
    if path.extension().map_or(false, |ext| ext == "zip" || ext == "jar") {
        let archive = ArchiveSource::open(path, &args.archive_root)?;
        println!("  Found {} files", archive.len());
        Ok(Box::new(archive))
    } else {
        Ok(Box::new(DirectorySource::new(path)))
    }
}

#[cfg(feature = "http")]
fn open_http(assets: &str) -> Option<Box<dyn AssetSource>> {
    if assets.starts_with("http://") || assets.starts_with("https://") {
        Some(Box::new(craft_scene::HttpSource::new(assets)))
    } else {
        None
    }
}

#[cfg(not(feature = "http"))]
fn open_http(_assets: &str) -> Option<Box<dyn AssetSource>> {
    None
}

fn export_scene(node: &NodeRef, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let obj_path = if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("obj")
    };
    let name = obj_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scene")
        .to_string();

    let export = ObjExport::from_scene(node, &name)?;
    let mtl_path = obj_path.with_extension("mtl");

    fs::write(&obj_path, &export.obj)?;
    fs::write(&mtl_path, &export.mtl)?;
    for texture in &export.textures {
        fs::write(obj_path.with_file_name(&texture.filename), &texture.png_data)?;
    }

    println!("Exported OBJ to {:?}", obj_path);
    println!("  Material: {:?}", mtl_path);
    println!("  Textures: {}", export.textures.len());
    Ok(())
}

fn print_stats(session: &Session) {
    let stats = session.stats();
    println!(
        "  {} geometries and {} materials still alive, {} released",
        stats.live_geometries(),
        stats.live_materials(),
        stats.released()
    );
}
