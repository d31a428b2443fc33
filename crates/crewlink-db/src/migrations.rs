use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

/// Official skill catalogue, seeded on every start.
pub const OFFICIAL_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "Ableton",
    "Cubase",
    "Adobe After Effects",
    "Photoshop",
    "SQL",
    "Drums",
    "Vocals",
    "Violin",
    "DJ",
    "Mixing",
    "Mastering",
];

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL UNIQUE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE cities (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                name    TEXT NOT NULL UNIQUE
            );

            CREATE TABLE jobs (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                title   TEXT NOT NULL UNIQUE
            );

            CREATE TABLE skills (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                title   TEXT NOT NULL UNIQUE,
                status  TEXT NOT NULL DEFAULT 'official' CHECK (status IN ('official', 'custom'))
            );

            CREATE TABLE topics (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                title   TEXT NOT NULL UNIQUE,
                status  TEXT NOT NULL DEFAULT 'official' CHECK (status IN ('official', 'custom'))
            );

            CREATE TABLE projects (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_by  INTEGER NOT NULL REFERENCES users(id),
                manager_id  INTEGER NOT NULL REFERENCES users(id),
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE INDEX idx_projects_manager ON projects(manager_id);

            CREATE TABLE project_images (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                path        TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_project_images_project ON project_images(project_id);

            CREATE TABLE project_likes (
                project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (project_id, user_id)
            );

            CREATE TABLE project_followers (
                project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (project_id, user_id)
            );

            CREATE TABLE project_members (
                project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (project_id, user_id)
            );

            CREATE TABLE project_topics (
                project_id  INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                topic_id    INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (project_id, topic_id)
            );

            CREATE TABLE listings (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                slug        TEXT NOT NULL UNIQUE,
                posted_by   INTEGER NOT NULL REFERENCES users(id),
                job_id      INTEGER NOT NULL REFERENCES jobs(id),
                city_id     INTEGER NOT NULL REFERENCES cities(id),
                is_active   INTEGER NOT NULL DEFAULT 1,
                ends_at     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                deleted_at  TEXT
            );

            CREATE INDEX idx_listings_live ON listings(deleted_at, id);

            CREATE TABLE job_vacancies (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                slug        TEXT NOT NULL UNIQUE,
                posted_by   INTEGER NOT NULL REFERENCES users(id),
                job_id      INTEGER NOT NULL REFERENCES jobs(id),
                city_id     INTEGER NOT NULL REFERENCES cities(id),
                is_active   INTEGER NOT NULL DEFAULT 1,
                ends_at     TEXT NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL,
                deleted_at  TEXT
            );

            CREATE INDEX idx_job_vacancies_live ON job_vacancies(deleted_at, id);

            CREATE TABLE listing_skills (
                listing_id  INTEGER NOT NULL REFERENCES listings(id) ON DELETE CASCADE,
                skill_id    INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (listing_id, skill_id)
            );

            CREATE TABLE user_skills (
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                skill_id    INTEGER NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (user_id, skill_id)
            );

            CREATE TABLE user_topics (
                user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                topic_id    INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                PRIMARY KEY (user_id, topic_id)
            );

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    seed_official_skills(conn)?;

    info!("Database migrations complete");
    Ok(())
}

fn seed_official_skills(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO skills (title, status) VALUES (?1, 'official')")?;
    for title in OFFICIAL_SKILLS {
        stmt.execute([title])?;
    }
    Ok(())
}
