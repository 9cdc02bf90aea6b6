use crate::schema::SchemaContext;

const TABLES: [&str; 14] = [
    "system_constant",
    "first_nations",
    "funding_source",
    "investment_action_category",
    "region",
    "species",
    "system_role",
    "project_role",
    "administrative_activity_status_type",
    "treatment_type",
    "project",
    "project_location",
    "treatment_unit",
    "treatment",
];

pub(super) fn up(ctx: &SchemaContext) -> String {
    let mut sql = format!(
        r#"
CREATE SCHEMA IF NOT EXISTS {schema};
CREATE SCHEMA IF NOT EXISTS {api};
{search_path}

-- Reference tables

CREATE TABLE system_constant (
    system_constant_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    constant_name       varchar(50) NOT NULL UNIQUE,
    character_value     varchar(300),
    numeric_value       numeric(10, 0),
    description         varchar(250)
);

CREATE TABLE first_nations (
    first_nations_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name              varchar(300) NOT NULL UNIQUE,
    record_end_date   date
);

CREATE TABLE funding_source (
    funding_source_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name               varchar(100) NOT NULL UNIQUE,
    record_end_date    date
);

CREATE TABLE investment_action_category (
    investment_action_category_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    funding_source_id              integer NOT NULL REFERENCES funding_source (funding_source_id),
    name                           varchar(300) NOT NULL,
    record_end_date                date,
    UNIQUE (funding_source_id, name)
);

CREATE TABLE region (
    region_id        integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name             varchar(100) NOT NULL UNIQUE,
    record_end_date  date
);

CREATE TABLE species (
    species_id       integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name             varchar(300) NOT NULL UNIQUE,
    record_end_date  date
);

CREATE TABLE system_role (
    system_role_id   integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name             varchar(50) NOT NULL UNIQUE,
    record_end_date  date
);

CREATE TABLE project_role (
    project_role_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name             varchar(50) NOT NULL UNIQUE,
    record_end_date  date
);

CREATE TABLE administrative_activity_status_type (
    administrative_activity_status_type_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name                                    varchar(50) NOT NULL UNIQUE,
    record_end_date                         date
);

CREATE TABLE treatment_type (
    treatment_type_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name               varchar(100) NOT NULL UNIQUE,
    record_end_date    date
);

-- Projects, plans and their treatments

CREATE TABLE project (
    project_id         integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    name               varchar(300) NOT NULL,
    is_project         boolean NOT NULL DEFAULT true,
    objectives         varchar(3000),
    start_date         date NOT NULL,
    end_date           date,
    state_code         integer,
    number_sites       integer,
    size_ha            numeric(12, 2),
    publish_timestamp  timestamptz,
    revision_count     integer NOT NULL DEFAULT 0,
    create_date        timestamptz NOT NULL DEFAULT now(),
    CONSTRAINT project_date_range CHECK (end_date IS NULL OR end_date >= start_date)
);

CREATE TABLE project_location (
    project_location_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    project_id           integer NOT NULL REFERENCES project (project_id) ON DELETE CASCADE,
    geojson              jsonb NOT NULL
);
CREATE INDEX project_location_project_idx ON project_location (project_id);

CREATE TABLE treatment_unit (
    treatment_unit_id  integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    project_id         integer NOT NULL REFERENCES project (project_id) ON DELETE CASCADE,
    name               varchar(300) NOT NULL,
    feature_type       varchar(100),
    width              numeric(12, 2),
    length             numeric(12, 2),
    area               numeric(12, 2),
    geojson            jsonb NOT NULL,
    UNIQUE (project_id, name)
);

CREATE TABLE treatment (
    treatment_id       integer GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
    treatment_unit_id  integer NOT NULL REFERENCES treatment_unit (treatment_unit_id) ON DELETE CASCADE,
    treatment_type_id  integer NOT NULL REFERENCES treatment_type (treatment_type_id),
    year               integer NOT NULL,
    UNIQUE (treatment_unit_id, treatment_type_id, year)
);
CREATE INDEX treatment_unit_project_idx ON treatment_unit (project_id);

CREATE FUNCTION api_get_character_system_metadata_constant(_constant_name varchar)
RETURNS varchar
LANGUAGE sql
STABLE
AS $$
    SELECT character_value FROM {schema}.system_constant WHERE constant_name = _constant_name;
$$;

-- Seed reference data

INSERT INTO funding_source (name) VALUES
    ('Habitat Conservation Trust Foundation'),
    ('Land Based Investment Strategy'),
    ('Federal Species at Risk'),
    ('Forest Enhancement Society of BC');

INSERT INTO investment_action_category (funding_source_id, name)
    SELECT funding_source_id, 'Not Applicable' FROM funding_source;

INSERT INTO investment_action_category (funding_source_id, name)
    SELECT fs.funding_source_id, c.name
    FROM funding_source AS fs,
         (VALUES ('Action'), ('Stewardship'), ('Inventory'), ('Research')) AS c (name)
    WHERE fs.name = 'Land Based Investment Strategy';

INSERT INTO first_nations (name) VALUES
    ('Blueberry River First Nations'),
    ('Doig River First Nation'),
    ('Halfway River First Nation'),
    ('Saulteau First Nations'),
    ('West Moberly First Nations');

INSERT INTO region (name) VALUES
    ('Cariboo'),
    ('Kootenay-Boundary'),
    ('Northeast'),
    ('Omineca'),
    ('Skeena'),
    ('South Coast'),
    ('Thompson-Okanagan'),
    ('West Coast');

INSERT INTO species (name) VALUES
    ('Caribou'),
    ('Moose'),
    ('Grizzly Bear'),
    ('Wolverine'),
    ('Fisher');

INSERT INTO system_role (name) VALUES
    ('System Administrator'),
    ('Project Creator'),
    ('Data Administrator');

INSERT INTO project_role (name) VALUES
    ('Project Lead'),
    ('Editor'),
    ('Viewer');

INSERT INTO administrative_activity_status_type (name) VALUES
    ('Pending'),
    ('Actioned'),
    ('Rejected');

INSERT INTO treatment_type (name) VALUES
    ('Seeding'),
    ('Planting'),
    ('Linear Restoration'),
    ('Road Decommissioning'),
    ('Fencing'),
    ('Debris Rollback');

-- Compatibility views
"#,
        schema = ctx.schema(),
        api = ctx.api_schema(),
        search_path = ctx.migration_search_path(),
    );

    for table in TABLES {
        sql.push_str(&ctx.compatibility_view(table));
    }
    sql
}
