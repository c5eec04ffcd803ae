//! Build script for codec-context-node
//!
//! Compiles `src/ffi/accessors.c` and links libavcodec/libavutil. The FFmpeg install is
//! described by pkg-config (`FFMPEG_DIR/lib/pkgconfig` first when `FFMPEG_DIR` is set).
//! Static archives are preferred when the install has them, in which case the transitive
//! dependencies come from `pkg-config --static --libs`.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// FFmpeg libraries the accessor layer calls into, in link order
const FFMPEG_LIBS: [&str; 2] = ["avcodec", "avutil"];

/// pkg-config module names matching `FFMPEG_LIBS`
const PKG_MODULES: [&str; 2] = ["libavcodec", "libavutil"];

/// Where the FFmpeg headers and libraries were found
struct FfmpegInstall {
  include_dirs: Vec<PathBuf>,
  lib_dir: Option<PathBuf>,
}

fn main() {
  if env::var_os("CARGO_FEATURE_NODE").is_some() {
    napi_build::setup();
  }

  let install = locate_ffmpeg();
  compile_accessors(&install);
  link_ffmpeg(&install);

  println!("cargo:rerun-if-changed=src/ffi/accessors.c");
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
  println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
}

/// Run pkg-config for both FFmpeg modules, honouring `FFMPEG_DIR`
fn pkg_config(args: &[&str]) -> Option<String> {
  let mut cmd = Command::new("pkg-config");
  cmd.args(args).args(PKG_MODULES);

  if let Some(dir) = env::var_os("FFMPEG_DIR") {
    let mut search = vec![PathBuf::from(dir).join("lib").join("pkgconfig")];
    if let Some(existing) = env::var_os("PKG_CONFIG_PATH") {
      search.extend(env::split_paths(&existing));
    }
    if let Ok(joined) = env::join_paths(search) {
      cmd.env("PKG_CONFIG_PATH", joined);
    }
  }

  let output = cmd.output().ok()?;
  if !output.status.success() {
    return None;
  }
  Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn locate_ffmpeg() -> FfmpegInstall {
  if let Some(dir) = env::var_os("FFMPEG_DIR").map(PathBuf::from) {
    return FfmpegInstall {
      include_dirs: vec![dir.join("include")],
      lib_dir: Some(dir.join("lib")),
    };
  }

  if let Some(cflags) = pkg_config(&["--cflags-only-I"]) {
    let include_dirs = cflags
      .split_whitespace()
      .filter_map(|flag| flag.strip_prefix("-I"))
      .map(PathBuf::from)
      .collect();
    let lib_dir = pkg_config(&["--variable=libdir"])
      .and_then(|out| out.split_whitespace().next().map(PathBuf::from));
    return FfmpegInstall {
      include_dirs,
      lib_dir,
    };
  }

  println!(
    "cargo:warning=FFmpeg not found via pkg-config. Set FFMPEG_DIR to the install prefix."
  );
  FfmpegInstall {
    include_dirs: Vec::new(),
    lib_dir: None,
  }
}

fn compile_accessors(install: &FfmpegInstall) {
  let mut build = cc::Build::new();
  build
    .file("src/ffi/accessors.c")
    .includes(&install.include_dirs)
    .warnings(true)
    .extra_warnings(true);

  build.compile("ffmpeg_accessors");
}

fn link_ffmpeg(install: &FfmpegInstall) {
  let archives = install.lib_dir.as_deref().and_then(static_archives);

  match archives {
    Some(archives) => {
      // Full paths keep the linker from picking a shared object of the same name
      for archive in &archives {
        println!("cargo:rustc-link-arg={}", archive.display());
      }
      match pkg_config(&["--static", "--libs"]) {
        Some(libs) => link_pkg_config_deps(&libs),
        None => println!(
          "cargo:warning=pkg-config unavailable; static FFmpeg dependencies are not linked"
        ),
      }
    }
    None => {
      if let Some(dir) = &install.lib_dir {
        println!("cargo:rustc-link-search=native={}", dir.display());
      }
      for lib in &FFMPEG_LIBS {
        println!("cargo:rustc-link-lib=dylib={}", lib);
      }
    }
  }
}

/// Paths of every FFmpeg archive, or None when any of them is missing
fn static_archives(lib_dir: &Path) -> Option<Vec<PathBuf>> {
  FFMPEG_LIBS
    .iter()
    .map(|lib| lib_dir.join(format!("lib{}.a", lib)))
    .map(|path| path.exists().then_some(path))
    .collect()
}

/// Forward the `-L`, `-l` and `-framework` entries of a static pkg-config link line,
/// skipping the FFmpeg libraries already linked by path
fn link_pkg_config_deps(libs: &str) {
  let mut tokens = libs.split_whitespace();
  while let Some(token) = tokens.next() {
    if let Some(dir) = token.strip_prefix("-L") {
      println!("cargo:rustc-link-search=native={}", dir);
    } else if let Some(lib) = token.strip_prefix("-l") {
      if !FFMPEG_LIBS.contains(&lib) {
        println!("cargo:rustc-link-lib={}", lib);
      }
    } else if token == "-framework" {
      if let Some(framework) = tokens.next() {
        println!("cargo:rustc-link-lib=framework={}", framework);
      }
    }
  }
}
