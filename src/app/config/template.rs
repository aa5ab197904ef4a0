//! Embedded configuration template for `rigup config init`.

pub(super) const TEMPLATE: &str = r#"# rigup configuration
#
# Every value has a default matching the standard deployment layout;
# the ones you almost certainly need to change are the domain, the
# expected elastic IP, the repository URLs and the certificate bucket.

[network]
domain = "chat.example.com"
expected_address = "13.203.1.165"
metadata_url = "http://169.254.169.254/latest/meta-data/public-ipv4"

[runtime]
node_version = "20"
nvm_version = "0.39.7"
profile_path = "/root/.bashrc"

[proxy]
cert_bucket = "s3://rigup-certs"
cert_dir = "/etc/nginx/certs"
site_path = "/etc/nginx/sites-available/rigup.conf"
enabled_path = "/etc/nginx/sites-enabled/rigup.conf"
default_site = "/etc/nginx/sites-enabled/default"

[frontend]
repo_url = "https://github.com/usealtoal/chat-frontend.git"
dir = "/opt/chat-frontend"
app_name = "frontend"
port = 8081

[backend]
repo_url = "https://github.com/usealtoal/rag-backend.git"
dir = "/opt/rag-backend"
app_name = "backend"
port = 8000
entry = "main.py"
nfs_export = "fs.internal:/"
mount_point = "/mnt/shared"

[model]
name = "llama3"
port = 11434
install_url = "https://ollama.com/install.sh"
service = "ollama"

[health]
script_path = "/usr/local/bin/health_check.sh"

[logging]
level = "info"
format = "pretty"
"#;
