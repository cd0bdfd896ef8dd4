//! Installer compiler invocation.

use crate::bundler::{
    error::{Error, Result},
    settings::{Settings, WindowsPaths},
    utils::process::{self, ToolOutput},
    version::NormalizedVersion,
};
use std::{ffi::OsString, path::PathBuf};
use tokio::process::Command;

/// Locates the installer compiler from the process environment.
pub fn locate_compiler(settings: &Settings) -> Result<PathBuf> {
    locate_compiler_with(settings, |name| std::env::var_os(name))
}

/// Locates the installer compiler, reading environment variables through `lookup`.
///
/// An explicit `[windows].compiler` wins. Otherwise the compiler lives under
/// the program files directory matching the target architecture, e.g.
/// `%PROGRAMFILES(X86)%\Inno Setup 5\iscc.exe` for 64-bit builds.
pub fn locate_compiler_with<F>(settings: &Settings, lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let windows = settings.windows();
    if let Some(compiler) = &windows.compiler {
        return Ok(compiler.clone());
    }

    let name = format!("PROGRAMFILES{}", settings.arch().program_files_suffix());
    let program_files = lookup(&name).ok_or(Error::MissingEnv { name })?;

    Ok(PathBuf::from(program_files)
        .join(&windows.compiler_dir)
        .join(&windows.compiler_exe))
}

/// Preprocessor definitions and output options for the installer script.
pub fn compiler_args(
    settings: &Settings,
    paths: &WindowsPaths,
    version: &NormalizedVersion,
) -> Vec<OsString> {
    let arch = settings.arch();

    let mut args: Vec<OsString> = Vec::with_capacity(8);
    let mut define = |name: &str, value: &std::ffi::OsStr| {
        let mut arg = OsString::from(format!("/D{name}="));
        arg.push(value);
        args.push(arg);
    };
    define("source", paths.staging_dir.as_os_str());
    define("version_is", version.as_str().as_ref());
    define("version", settings.version_string().as_ref());
    define("arch", arch.code().to_string().as_ref());
    define("archs_allowed", arch.archs_allowed().as_ref());
    define("resources", paths.staged_resources.as_os_str());

    let mut output = OsString::from("/O");
    output.push(&paths.installer_output_dir);
    args.push(output);
    args.push(paths.installer_script.clone().into_os_string());
    args
}

/// Compiles the installer script with the located compiler.
pub async fn compile_installer(
    settings: &Settings,
    paths: &WindowsPaths,
    version: &NormalizedVersion,
) -> Result<ToolOutput> {
    let compiler = locate_compiler(settings)?;
    log::debug!("Installer compiler: {}", compiler.display());

    let mut command = Command::new(&compiler);
    command
        .args(compiler_args(settings, paths, version))
        .current_dir(settings.build_dir());
    process::run_tool(&mut command, settings.tool_failures()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{Arch, PackageSettings, SettingsBuilder};

    fn settings(arch: Arch) -> Settings {
        SettingsBuilder::new()
            .build_dir(std::env::temp_dir().join("nagstamon").join("build"))
            .package_settings(PackageSettings {
                product_name: "Nagstamon".into(),
                version: "3.2-alpha1".into(),
                entry_script: "nagstamon.py".into(),
                resources_dir: "Nagstamon/resources".into(),
                runtime_version: "3".into(),
            })
            .arch(arch)
            .build()
            .unwrap()
    }

    #[test]
    fn program_files_variable_follows_architecture() {
        let env = |name: &str| match name {
            "PROGRAMFILES" => Some(OsString::from("C32")),
            "PROGRAMFILES(X86)" => Some(OsString::from("C64")),
            _ => None,
        };

        let x64 = locate_compiler_with(&settings(Arch::X86_64), env).unwrap();
        assert_eq!(x64, PathBuf::from("C64").join("Inno Setup 5").join("iscc.exe"));

        let x86 = locate_compiler_with(&settings(Arch::X86), env).unwrap();
        assert_eq!(x86, PathBuf::from("C32").join("Inno Setup 5").join("iscc.exe"));
    }

    #[test]
    fn missing_program_files_is_reported() {
        let err = locate_compiler_with(&settings(Arch::X86_64), |_| None).unwrap_err();
        match err {
            Error::MissingEnv { name } => assert_eq!(name, "PROGRAMFILES(X86)"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn arguments_carry_both_versions_and_architecture() {
        let settings = settings(Arch::X86_64);
        let paths = WindowsPaths::new(&settings);
        let version = NormalizedVersion::parse(settings.version_string()).unwrap();

        let args: Vec<String> = compiler_args(&settings, &paths, &version)
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args.len(), 8);
        assert_eq!(args[0], format!("/Dsource={}", paths.staging_dir.display()));
        assert_eq!(args[1], "/Dversion_is=3.2.1");
        assert_eq!(args[2], "/Dversion=3.2-alpha1");
        assert_eq!(args[3], "/Darch=64");
        assert_eq!(args[4], "/Darchs_allowed=x64");
        assert_eq!(args[5], format!("/Dresources={}", paths.staged_resources.display()));
        assert_eq!(args[6], format!("/O{}", settings.build_dir().display()));
        assert_eq!(args[7], paths.installer_script.display().to_string());
    }

    #[test]
    fn explicit_compiler_skips_environment() {
        let mut windows = crate::bundler::WindowsSettings::default();
        windows.compiler = Some(PathBuf::from("iscc"));
        let settings = SettingsBuilder::new()
            .build_dir(std::env::temp_dir())
            .package_settings(settings(Arch::X86).package().clone())
            .windows_settings(windows)
            .build()
            .unwrap();
        assert_eq!(
            locate_compiler_with(&settings, |_| None).unwrap(),
            PathBuf::from("iscc")
        );
    }
}
