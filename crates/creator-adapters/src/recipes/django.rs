//! The Django recipe: `django-admin startproject`, the base-project
//! template and the patches that wire `.env` loading, routes and settings.
//!
//! Anchors target the files generated by `startproject` in Django 2.2
//! ([`SUPPORTED_DJANGO`]): single-quoted strings and `os.path` paths. Later
//! releases format those files differently and fail with `AnchorNotFound`.

use creator_core::domain::{
    DomainError, Edit, EnvFileSpec, FilePatch, GeneratorSpec, ProjectRecipe, RelativePath,
    TemplateRepository,
};

/// Django release whose `startproject` output the anchors match.
pub const SUPPORTED_DJANGO: &str = "2.2";

pub const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/arielcalzadadeveloper/django-base-project.git";

/// Values the recipe is parameterised over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSettings {
    pub generator_program: String,
    pub project_name: String,
    pub template_url: String,
    pub template_branch: Option<String>,
    pub shallow_clone: bool,
    pub env_example: String,
    pub env_file: String,
    pub language_code: String,
    pub time_zone: String,
}

impl Default for RecipeSettings {
    fn default() -> Self {
        Self {
            generator_program: "django-admin".into(),
            project_name: "conf".into(),
            template_url: DEFAULT_TEMPLATE_URL.into(),
            template_branch: None,
            shallow_clone: true,
            env_example: "env.example".into(),
            env_file: ".env".into(),
            language_code: "es-co".into(),
            time_zone: "America/Bogota".into(),
        }
    }
}

/// Build the Django recipe for `settings`.
pub fn django_recipe(settings: &RecipeSettings) -> Result<ProjectRecipe, DomainError> {
    let name = &settings.project_name;
    if !is_python_identifier(name) {
        return Err(DomainError::InvalidRecipe(format!(
            "project name '{name}' is not a valid Python package name"
        )));
    }

    for (field, value) in [
        ("env file", &settings.env_file),
        ("language code", &settings.language_code),
        ("time zone", &settings.time_zone),
    ] {
        check_python_literal(field, value)?;
    }

    let package = RelativePath::try_new(name.as_str())?;

    Ok(ProjectRecipe {
        name: "django".into(),
        generator: GeneratorSpec {
            program: settings.generator_program.clone(),
            subcommand: "startproject".into(),
            project_name: name.clone(),
        },
        template: TemplateRepository {
            url: settings.template_url.clone(),
            branch: settings.template_branch.clone(),
            shallow: settings.shallow_clone,
        },
        env_file: EnvFileSpec {
            example: RelativePath::try_new(settings.env_example.as_str())?,
            active: RelativePath::try_new(settings.env_file.as_str())?,
        },
        patches: vec![
            wsgi_patch(package.join("wsgi.py")?, name, &settings.env_file),
            urls_patch(package.join("urls.py")?),
            settings_patch(package.join("settings.py")?, settings),
        ],
    })
}

fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Values spliced into single-quoted Python literals.
fn check_python_literal(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::InvalidRecipe(format!("{field} is empty")));
    }
    if let Some(c) = value.chars().find(|&c| matches!(c, '\'' | '\\') || c.is_control()) {
        return Err(DomainError::InvalidRecipe(format!(
            "{field} '{}' contains {c:?}, which cannot appear in a Python string",
            value.escape_debug()
        )));
    }
    Ok(())
}

fn wsgi_patch(path: RelativePath, project_name: &str, env_file: &str) -> FilePatch {
    FilePatch::new("wsgi", path)
        .with_edit(Edit::insert_after(
            "from django.core.wsgi import get_wsgi_application\n",
            "from dotenv import load_dotenv\n",
        ))
        .with_edit(Edit::insert_after(
            format!("os.environ.setdefault('DJANGO_SETTINGS_MODULE', '{project_name}.settings')\n"),
            format!(
                "\nload_dotenv(os.path.join(os.path.dirname(os.path.dirname(os.path.abspath(__file__))), '{env_file}'))\n"
            ),
        ))
}

fn urls_patch(path: RelativePath) -> FilePatch {
    FilePatch::new("urls", path)
        .with_edit(Edit::insert_after(
            "from django.urls import path\n",
            "from django.conf import settings\n\
             from django.conf.urls.static import static\n\
             from django.urls import include\n",
        ))
        .with_edit(Edit::insert_after(
            "    path('admin/', admin.site.urls),\n",
            "    path('', include('applications.common.urls')),\n",
        ))
        .with_edit(Edit::append(
            "\nif settings.DEBUG:\n    urlpatterns += static(settings.MEDIA_URL, document_root=settings.MEDIA_ROOT)\n",
        ))
        .with_edit(Edit::append(
            "\nadmin.site.site_header = settings.ADMIN_SITE_HEADER\n\
             admin.site.site_title = settings.ADMIN_SITE_TITLE\n",
        ))
}

const SQLITE_DATABASES: &str = "DATABASES = {
    'default': {
        'ENGINE': 'django.db.backends.sqlite3',
        'NAME': os.path.join(BASE_DIR, 'db.sqlite3'),
    }
}
";

const ENV_DATABASES: &str = "DATABASES = {
    'default': {
        'ENGINE': os.getenv('DATABASE_ENGINE', 'django.db.backends.sqlite3'),
        'NAME': os.getenv('DATABASE_NAME', os.path.join(BASE_DIR, 'db.sqlite3')),
        'USER': os.getenv('DATABASE_USER', ''),
        'PASSWORD': os.getenv('DATABASE_PASSWORD', ''),
        'HOST': os.getenv('DATABASE_HOST', ''),
        'PORT': os.getenv('DATABASE_PORT', ''),
    }
}
";

const STATIC_FILES: &str = "STATIC_URL = '/static/'
STATIC_ROOT = os.path.join(BASE_DIR, 'staticfiles')
STATICFILES_DIRS = [
    os.path.join(BASE_DIR, 'static'),
]

MEDIA_URL = '/media/'
MEDIA_ROOT = os.path.join(BASE_DIR, 'media')
";

const AUTHENTICATION_BACKENDS: &str = "AUTHENTICATION_BACKENDS = (
    'django.contrib.auth.backends.ModelBackend',
)


";

const THIRD_PARTY: &str = "# Third party libraries

CRISPY_TEMPLATE_PACK = 'bootstrap4'

DEBUG_TOOLBAR_CONFIG = {
    'SHOW_TOOLBAR_CALLBACK': lambda request: DEBUG,
}


";

const TRAILING: &str = "
# Authentication

LOGIN_URL = 'login'
LOGIN_REDIRECT_URL = '/'
LOGOUT_REDIRECT_URL = 'login'

# Admin

ADMIN_SITE_HEADER = os.getenv('ADMIN_SITE_HEADER', 'Administration')
ADMIN_SITE_TITLE = os.getenv('ADMIN_SITE_TITLE', 'Administration')
";

fn settings_patch(path: RelativePath, settings: &RecipeSettings) -> FilePatch {
    FilePatch::new("settings", path)
        .with_edit(Edit::replace(
            "DEBUG = True\n",
            "DEBUG = os.getenv('DEBUG', 'False') == 'True'\n",
        ))
        .with_edit(Edit::replace(
            "ALLOWED_HOSTS = []\n",
            "ALLOWED_HOSTS = [host.strip() for host in os.getenv('ALLOWED_HOSTS', '').split(',') if host.strip()]\n",
        ))
        .with_edit(Edit::insert_after(
            "    'django.contrib.staticfiles',\n",
            "\n    'crispy_forms',\n    'debug_toolbar',\n\n    'applications.common',\n",
        ))
        .with_edit(Edit::insert_after(
            "                'django.contrib.messages.context_processors.messages',\n",
            "                'applications.common.context_processors.site',\n",
        ))
        .with_edit(Edit::insert_after(
            "        'OPTIONS': {\n",
            "            'builtins': [\n                'django.templatetags.static',\n            ],\n",
        ))
        .with_edit(Edit::insert_before(
            "# Password validation\n",
            AUTHENTICATION_BACKENDS,
        ))
        .with_edit(Edit::insert_before("# Internationalization\n", THIRD_PARTY))
        .with_edit(Edit::replace(SQLITE_DATABASES, ENV_DATABASES))
        .with_edit(Edit::replace(
            "LANGUAGE_CODE = 'en-us'\n",
            format!("LANGUAGE_CODE = '{}'\n", settings.language_code),
        ))
        .with_edit(Edit::replace(
            "TIME_ZONE = 'UTC'\n",
            format!("TIME_ZONE = '{}'\n", settings.time_zone),
        ))
        .with_edit(Edit::replace("STATIC_URL = '/static/'\n", STATIC_FILES))
        .with_edit(Edit::append(TRAILING))
}
