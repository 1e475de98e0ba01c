// WGF
// copyright zipxing@hotmail.com 2022～2025

// Shared cfg_aliases configuration function
// Called in each crate's build.rs: setup_wgf_cfg_aliases();

fn setup_wgf_cfg_aliases() {
    use cfg_aliases::cfg_aliases;

    cfg_aliases! {
        // Platform aliases
        wasm: { target_arch = "wasm32" },
        mobile: { any(target_os = "android", target_os = "ios") },

        // Rendering backend aliases
        cross_backend: { all(feature = "term", not(feature = "headless"), not(any(wasm, mobile))) },
        headless_backend: { not(cross_backend) },

        // Audio support aliases
        audio_support: { all(feature = "audio", not(any(mobile, wasm))) },
    }
}
