//! Fetch and parse the decorative GLB model.
//!
//! The model is purely cosmetic: any failure along fetch/parse simply leaves
//! it out of the scene.

use js_sys::Uint8Array;
use scene_core::mesh::{MeshData, Vertex};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct LoadedModel {
    pub mesh: MeshData,
    /// Duration of the embedded idle clip, when the asset carries one.
    pub clip_duration: Option<f32>,
}

pub async fn fetch_model(url: &str) -> Option<LoadedModel> {
    let bytes = match fetch_bytes(url).await {
        Ok(b) => b,
        Err(e) => {
            log::warn!("model fetch failed ({url}): {:?}", e);
            return None;
        }
    };
    match parse_model(&bytes) {
        Ok(model) => Some(model),
        Err(e) => {
            log::warn!("model parse failed ({url}): {e}");
            None
        }
    }
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer()?).await?;
    Ok(Uint8Array::new(&buf).to_vec())
}

fn parse_model(bytes: &[u8]) -> anyhow::Result<LoadedModel> {
    let (doc, buffers, _images) = gltf::import_slice(bytes)?;

    let mut mesh = MeshData::default();
    for gltf_mesh in doc.meshes() {
        for prim in gltf_mesh.primitives() {
            let base_color = prim
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            let color = [base_color[0], base_color[1], base_color[2]];

            let reader = prim.reader(|buffer| Some(&buffers[buffer.index()].0[..]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(n) => n.collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };

            let base = mesh.vertices.len() as u32;
            for (i, p) in positions.iter().enumerate() {
                mesh.vertices.push(Vertex {
                    position: *p,
                    normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                    color,
                });
            }
            match reader.read_indices() {
                Some(idx) => mesh.indices.extend(idx.into_u32().map(|i| base + i)),
                None => mesh
                    .indices
                    .extend((0..positions.len() as u32).map(|i| base + i)),
            }
        }
    }
    if mesh.vertices.is_empty() {
        anyhow::bail!("no mesh primitives in model");
    }

    // The idle clip duration is the longest keyframe timestamp across all
    // animation channels.
    let mut duration = 0.0_f32;
    for anim in doc.animations() {
        for channel in anim.channels() {
            let reader = channel.reader(|buffer| Some(&buffers[buffer.index()].0[..]));
            if let Some(inputs) = reader.read_inputs() {
                for t in inputs {
                    duration = duration.max(t);
                }
            }
        }
    }

    Ok(LoadedModel {
        mesh,
        clip_duration: (duration > 0.0).then_some(duration),
    })
}
