//! Global CSS styles for the Resonance shell.

pub const GLOBAL_STYLES: &str = r#"
:root {
  --bg: #101214;
  --bg-panel: #16191c;
  --border: #23272b;

  --accent: #5f8fff;
  --accent-soft: rgba(95, 143, 255, 0.25);
  --danger: #ff3366;

  --text-primary: #f0f2f4;
  --text-secondary: rgba(240, 242, 244, 0.7);
  --text-muted: rgba(240, 242, 244, 0.45);

  --font-sans: 'Inter', 'Helvetica Neue', sans-serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;
}

*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
}

body {
  background: var(--bg);
  color: var(--text-primary);
  font-family: var(--font-sans);
  line-height: 1.5;
}

.status {
  max-width: 640px;
  margin: 0 auto;
  padding: 3rem 1.5rem;
}

.status-header h1 {
  font-size: 2rem;
  letter-spacing: 0.02em;
}

.tagline {
  color: var(--text-muted);
  margin-bottom: 2rem;
}

.panel {
  background: var(--bg-panel);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1.25rem 1.5rem;
  margin-bottom: 1.25rem;
}

.panel h2 {
  font-size: 1rem;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  color: var(--text-secondary);
  margin-bottom: 0.75rem;
}

.panel-error {
  border-color: var(--danger);
}

.mono {
  font-family: var(--font-mono);
  font-size: 0.85rem;
  color: var(--text-secondary);
  word-break: break-all;
}

.hint {
  color: var(--text-muted);
  font-size: 0.85rem;
  margin-top: 0.5rem;
}

.btn {
  margin-top: 0.75rem;
  padding: 0.5rem 1rem;
  border: 1px solid var(--accent);
  border-radius: 6px;
  background: var(--accent-soft);
  color: var(--text-primary);
  font-family: inherit;
  cursor: pointer;
}

.btn:hover {
  background: var(--accent);
}
"#;
