//! Single-page UI served at `/`.

use crate::backend::BackendState;
use crate::config::{STEP_RANGE, Settings};

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>🎙️ VibeVoice - AI Voice Generation</title>
<style>
body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.row { display: flex; gap: 2rem; flex-wrap: wrap; }
.main { flex: 2; min-width: 320px; }
.side { flex: 1; min-width: 240px; }
textarea { width: 100%; }
.policy { background: #fff8e1; padding: 0.5rem 1rem; border-radius: 6px; }
#status { width: 100%; }
</style>
</head>
<body>
<h1>🎙️ VibeVoice - AI Voice Generation &amp; Podcast Creation</h1>
<p>Transform text into natural-sounding speech with AI voice cloning capabilities.</p>

<section class="policy">
<h2>⚠️ Important Usage Guidelines</h2>
<p>{{DISCLAIMER}}</p>
<h3>📋 Guidelines:</h3>
<ol>{{GUIDELINES}}</ol>
<h3>🚨 Legal Notice:</h3>
<ul>{{LEGAL}}</ul>
<p>By using this tool, you agree to comply with all applicable laws and ethical standards.</p>
</section>

<div class="row">
<div class="main">
<label>📝 Text to Convert<br><textarea id="text" rows="5" placeholder="Enter the text you want to convert to speech..."></textarea></label>
<p><label>🎤 Reference Voice (Optional) <input id="voice" type="file" accept="audio/wav"></label></p>
<p><label>🎛️ Inference Steps <input id="steps" type="range" min="{{MIN_STEPS}}" max="{{MAX_STEPS}}" step="1" value="{{STEPS}}"> <span id="steps-value">{{STEPS}}</span></label>
<button id="generate">🎵 Generate Speech</button></p>
<label>📊 Status<br><input id="status" type="text" readonly value="Ready to generate speech"></label>
<h3>📚 Examples</h3>
<ul id="examples">
<li><a href="#">Hello, this is a sample text for voice generation.</a></li>
<li><a href="#">Welcome to the future of AI voice technology.</a></li>
<li><a href="#">Transform your text into natural-sounding speech.</a></li>
</ul>
</div>
<div class="side">
<h3>🔊 Generated Audio</h3>
<audio id="audio" controls></audio>
<p><a id="download" download="vibevoice.wav" hidden>📥 Download Audio</a></p>
<details><summary>ℹ️ Model Information</summary>
<p><b>Model</b>: {{MODEL}}<br><b>Inference Steps</b>: {{STEPS}}<br><b>Status</b>: <span id="model-status">{{MODEL_STATUS}}</span></p>
</details>
</div>
</div>

<hr>
<p><b>🔗 Links</b>: <a href="https://github.com/microsoft/VibeVoice">VibeVoice GitHub</a> | <a href="https://huggingface.co/microsoft/VibeVoice-1.5B">Hugging Face</a></p>
<p><b>⚠️ Disclaimer</b>: This is a demonstration tool. Always follow ethical guidelines and legal requirements when using AI voice generation.</p>

<script>
const $ = (id) => document.getElementById(id);
let voiceData = null;

async function post(url, body) {
  const res = await fetch(url, { method: "POST", headers: { "Content-Type": "application/json" }, body: JSON.stringify(body) });
  return res.json();
}

async function refreshStatus() {
  const r = await post("/api/status", { text: $("text").value, has_voice: voiceData !== null, steps: Number($("steps").value) });
  $("status").value = r.status;
}

$("text").addEventListener("input", refreshStatus);
$("steps").addEventListener("input", () => { $("steps-value").textContent = $("steps").value; refreshStatus(); });
$("voice").addEventListener("change", () => {
  const file = $("voice").files[0];
  if (!file) { voiceData = null; refreshStatus(); return; }
  const reader = new FileReader();
  reader.onload = () => { voiceData = reader.result; refreshStatus(); };
  reader.readAsDataURL(file);
});
document.querySelectorAll("#examples a").forEach((a) => a.addEventListener("click", (e) => {
  e.preventDefault();
  $("text").value = a.textContent;
  refreshStatus();
}));

$("generate").addEventListener("click", async () => {
  $("generate").disabled = true;
  $("status").value = "⏳ Generating...";
  try {
    const r = await post("/api/generate", { text: $("text").value, voice: voiceData, steps: Number($("steps").value) });
    $("status").value = r.status;
    if (r.audio) {
      $("audio").src = r.audio;
      $("download").href = r.audio;
      $("download").hidden = false;
      $("model-status").textContent = "✅ Loaded";
    }
  } catch (err) {
    $("status").value = "❌ Request failed: " + err;
  } finally {
    $("generate").disabled = false;
  }
});
</script>
</body>
</html>
"##;

/// Render the UI page for the current settings and backend state.
pub fn render(settings: &Settings, state: BackendState) -> String {
    let policy = &settings.usage_guidelines;
    let guidelines: String = policy.guidelines.iter().map(|g| format!("<li>{}</li>", escape_html(g))).collect();
    let legal: String = policy.legal_notice().iter().map(|n| format!("<li>{}</li>", escape_html(n))).collect();
    let model_status = if state == BackendState::Loaded { "✅ Loaded" } else { "❌ Not Loaded" };

    TEMPLATE
        .replace("{{DISCLAIMER}}", &escape_html(&policy.disclaimer))
        .replace("{{GUIDELINES}}", &guidelines)
        .replace("{{LEGAL}}", &legal)
        .replace("{{MIN_STEPS}}", &STEP_RANGE.start().to_string())
        .replace("{{MAX_STEPS}}", &STEP_RANGE.end().to_string())
        .replace("{{STEPS}}", &settings.inference_steps.to_string())
        .replace("{{MODEL}}", &escape_html(&settings.model_path))
        .replace("{{MODEL_STATUS}}", model_status)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
