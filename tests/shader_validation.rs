//! Parse and validate every embedded WGSL shader with naga.
//!
//! Catches shader syntax and type errors at test time instead of at the
//! first pipeline creation on a live GPU.

use naga::valid::{Capabilities, ValidationFlags, Validator};

use plume::shader::{BACKDROP_SHADER, PLUME_SHADER, SPRITE_SHADER, STARFIELD_SHADER};

fn validate(name: &str, source: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name}: parse failed:\n{}", e.emit_to_string(source)));

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .unwrap_or_else(|e| panic!("{name}: validation failed: {e:?}"));
}

#[test]
fn plume_shader_is_valid_wgsl() {
    validate("plume", PLUME_SHADER);
}

#[test]
fn starfield_shader_is_valid_wgsl() {
    validate("starfield", STARFIELD_SHADER);
}

#[test]
fn backdrop_shader_is_valid_wgsl() {
    validate("backdrop", BACKDROP_SHADER);
}

#[test]
fn sprite_shader_is_valid_wgsl() {
    validate("sprite", SPRITE_SHADER);
}
